// LogWarden - ui/theme.rs
//
// Maps rule colours to terminal styling. 24-bit ANSI escapes; matched text
// is bold in its category colour, unmatched text keeps the terminal default.
// Control characters in log text are always written as visible escapes.
// No dependencies on app state or business logic.

use crate::core::model::Rgb;
use std::fmt;

/// SGR reset.
const RESET: &str = "\x1b[0m";

/// Text colour used on legend swatches, which carry the category colour as
/// background.
pub const LEGEND_TEXT: Rgb = Rgb::new(0, 0, 0);

/// Whether and how to emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Text in bold category colour, or plain when `colour` is None.
    pub fn highlight<'a>(&self, text: &'a str, colour: Option<Rgb>) -> Styled<'a> {
        Styled {
            text,
            fg: colour.filter(|_| self.color),
            bg: None,
        }
    }

    /// Legend swatch: the label on its category colour.
    pub fn swatch<'a>(&self, label: &'a str, colour: Rgb) -> Styled<'a> {
        if self.color {
            Styled {
                text: label,
                fg: Some(LEGEND_TEXT),
                bg: Some(colour),
            }
        } else {
            Styled {
                text: label,
                fg: None,
                bg: None,
            }
        }
    }
}

/// A piece of text with optional styling, rendered via `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Styled<'a> {
    text: &'a str,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fg.is_none() && self.bg.is_none() {
            return write_escaped(f, self.text);
        }

        f.write_str("\x1b[1")?;
        if let Some(Rgb { r, g, b }) = self.fg {
            write!(f, ";38;2;{r};{g};{b}")?;
        }
        if let Some(Rgb { r, g, b }) = self.bg {
            write!(f, ";48;2;{r};{g};{b}")?;
        }
        f.write_str("m")?;
        write_escaped(f, self.text)?;
        f.write_str(RESET)
    }
}

/// Write log text with control characters (C0, DEL, C1) shown as `\u{..}`
/// escapes, so text read from a log can never drive the terminal. Tab is
/// passed through.
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if c.is_control() && c != '\t' {
            f.write_str(&text[start..idx])?;
            write!(f, "{}", c.escape_unicode())?;
            start = idx + c.len_utf8();
        }
    }
    f.write_str(&text[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: Rgb = Rgb::new(255, 215, 0);

    #[test]
    fn test_highlight_with_colour() {
        let theme = Theme::new(true);
        assert_eq!(
            theme.highlight("kernel panic", Some(GOLD)).to_string(),
            "\x1b[1;38;2;255;215;0mkernel panic\x1b[0m"
        );
    }

    #[test]
    fn test_unmatched_text_is_plain() {
        let theme = Theme::new(true);
        assert_eq!(theme.highlight("normal boot", None).to_string(), "normal boot");
    }

    #[test]
    fn test_colour_disabled() {
        let theme = Theme::new(false);
        assert_eq!(theme.highlight("x", Some(GOLD)).to_string(), "x");
        assert_eq!(theme.swatch("Kernel Issues", GOLD).to_string(), "Kernel Issues");
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let theme = Theme::new(false);
        assert_eq!(
            theme.highlight("a\x1b[2Jb\x07c\u{9b}d", None).to_string(),
            "a\\u{1b}[2Jb\\u{7}c\\u{9b}d"
        );
    }

    #[test]
    fn test_control_characters_escaped_inside_colour() {
        let theme = Theme::new(true);
        assert_eq!(
            theme.highlight("malware\x1b]0;x\x07", Some(GOLD)).to_string(),
            "\x1b[1;38;2;255;215;0mmalware\\u{1b}]0;x\\u{7}\x1b[0m"
        );
    }

    #[test]
    fn test_tab_and_unicode_pass_through() {
        let theme = Theme::new(false);
        assert_eq!(theme.highlight("a\tb \u{FFFD} é", None).to_string(), "a\tb \u{FFFD} é");
    }

    #[test]
    fn test_swatch_uses_background() {
        let theme = Theme::new(true);
        assert_eq!(
            theme.swatch("K", GOLD).to_string(),
            "\x1b[1;38;2;0;0;0;48;2;255;215;0mK\x1b[0m"
        );
    }
}
