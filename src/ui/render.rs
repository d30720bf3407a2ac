// LogWarden - ui/render.rs
//
// Text rendering of the load view, the analyze view, the legend, and the
// per-category summary. Writes to any `Write`; styling comes from `Theme`.

use crate::core::model::{AnnotatedDocument, CategoryCount};
use crate::core::report::MatchReport;
use crate::core::rules::RuleTable;
use crate::ui::theme::Theme;
use crate::util::constants;
use std::io::{self, Write};

/// Every line of the document, matched lines in their category colour.
pub fn render_document<W: Write>(
    out: &mut W,
    document: &AnnotatedDocument,
    theme: &Theme,
) -> io::Result<()> {
    for annotation in document {
        let colour = annotation.rule.as_ref().map(|r| r.colour());
        writeln!(out, "{}", theme.highlight(&annotation.line.text, colour))?;
    }
    Ok(())
}

/// The analyze view: a header with the count and one `[Line n]` row per
/// entry, or the positive "nothing found" message for a clear report.
pub fn render_report<W: Write>(out: &mut W, report: &MatchReport, theme: &Theme) -> io::Result<()> {
    if report.is_clear() {
        return writeln!(out, "{}", constants::NO_SUSPICIOUS_ACTIVITY_MESSAGE);
    }

    writeln!(out, "Found {} suspicious entries:", report.count())?;
    writeln!(out)?;
    for entry in report {
        writeln!(
            out,
            "[Line {}] {}",
            entry.line.number,
            theme.highlight(&entry.line.text, Some(entry.rule.colour()))
        )?;
    }
    Ok(())
}

/// One swatch per rule, in priority order.
pub fn render_legend<W: Write>(out: &mut W, rules: &RuleTable, theme: &Theme) -> io::Result<()> {
    writeln!(out, "Pattern Legend:")?;
    for rule in rules.rules() {
        writeln!(
            out,
            "  {:>2}. {}  /{}/i",
            rule.position() + 1,
            theme.swatch(rule.label(), rule.colour()),
            rule.pattern()
        )?;
    }
    Ok(())
}

/// Entry counts per category. Categories with no entries are listed too.
pub fn render_summary<W: Write>(
    out: &mut W,
    counts: &[CategoryCount],
    theme: &Theme,
) -> io::Result<()> {
    let width = counts.iter().map(|c| c.label.len()).max().unwrap_or(0);
    writeln!(out, "Summary:")?;
    for c in counts {
        // Pad outside the styled span so escapes don't skew alignment.
        let pad = width.saturating_sub(c.label.len());
        writeln!(
            out,
            "  {}{}  {:>6}",
            theme.highlight(&c.label, Some(c.colour)),
            " ".repeat(pad),
            c.count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::builtin_rules;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    const SAMPLE: &str = "normal boot\navc: denied { read }\nkernel panic - not syncing\nnormal shutdown\n";

    #[test]
    fn test_render_document_plain() {
        let doc = builtin_rules().unwrap().annotate(SAMPLE);
        let out = render(|w| render_document(w, &doc, &Theme::new(false)));
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn test_render_document_coloured_only_matches() {
        let doc = builtin_rules().unwrap().annotate(SAMPLE);
        let out = render(|w| render_document(w, &doc, &Theme::new(true)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "normal boot");
        assert_eq!(lines[1], "\x1b[1;38;2;220;20;60mavc: denied { read }\x1b[0m");
        assert_eq!(lines[2], "\x1b[1;38;2;255;215;0mkernel panic - not syncing\x1b[0m");
        assert_eq!(lines[3], "normal shutdown");
    }

    #[test]
    fn test_render_report() {
        let report = builtin_rules().unwrap().report(SAMPLE);
        let out = render(|w| render_report(w, &report, &Theme::new(false)));
        assert_eq!(
            out,
            "Found 2 suspicious entries:\n\n\
             [Line 2] avc: denied { read }\n\
             [Line 3] kernel panic - not syncing\n"
        );
    }

    #[test]
    fn test_render_clear_report() {
        let report = builtin_rules().unwrap().report("all quiet\n");
        let out = render(|w| render_report(w, &report, &Theme::new(true)));
        assert_eq!(out, "No suspicious activity found!\n");
    }

    #[test]
    fn test_embedded_escape_sequences_do_not_reach_output() {
        let text = "malware \x1b[2J\x1b]0;pwned\x07 here\nquiet \x1b[8mhidden\n";
        let table = builtin_rules().unwrap();

        for color in [false, true] {
            let theme = Theme::new(color);
            let doc = table.annotate(text);
            let out = render(|w| render_document(w, &doc, &theme));
            assert!(!out.contains("\x1b[2J"));
            assert!(!out.contains("\x1b]0;"));
            assert!(!out.contains('\x07'));
            assert!(!out.contains("\x1b[8m"));
            assert!(out.contains("\\u{1b}[2J"));

            let report = table.report(text);
            let out = render(|w| render_report(w, &report, &theme));
            assert!(!out.contains("\x1b[2J"));
            assert!(out.contains("[Line 1] "));
        }

        // The core keeps the line as read.
        let doc = table.annotate(text);
        assert_eq!(doc.annotations[0].line.text, "malware \x1b[2J\x1b]0;pwned\x07 here");
    }

    #[test]
    fn test_render_legend_lists_rules_in_order() {
        let table = builtin_rules().unwrap();
        let out = render(|w| render_legend(w, table, &Theme::new(false)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), table.len() + 1);
        assert!(lines[1].contains("1. Permission Issues"));
        assert!(lines[9].contains("9. Package Issues"));
    }

    #[test]
    fn test_render_summary_aligns_counts() {
        let table = builtin_rules().unwrap();
        let report = table.report(SAMPLE);
        let counts = report.category_counts(table);
        let out = render(|w| render_summary(w, &counts, &Theme::new(false)));
        let lines: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(lines.len(), table.len());
        let widths: Vec<usize> = lines.iter().map(|l| l.len()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert!(lines[0].starts_with("  Permission Issues"));
        assert!(lines[0].ends_with("     1"));
    }
}
