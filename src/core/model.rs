// LogWarden - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::core::rules::Rule;
use std::sync::Arc;

// =============================================================================
// Visual attribute handle
// =============================================================================

/// An RGB colour attached to a rule at table construction time.
///
/// The core never interprets this value; it is carried through so the
/// presentation layer can style a category without a second lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// =============================================================================
// Line
// =============================================================================

/// One line of input: its 1-based position and its exact text.
///
/// The text is kept as read, minus the line terminator. Leading and
/// trailing whitespace is never trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the source text.
    pub number: u64,

    /// Raw line content.
    pub text: String,
}

// =============================================================================
// Annotation (classification result for a single line)
// =============================================================================

/// A line paired with the rule that claimed it, or with no rule at all.
///
/// At most one rule is ever attached, even when several patterns match:
/// the earliest rule in table order wins.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub line: Line,

    /// The first matching rule, or `None` for an unmatched line.
    pub rule: Option<Arc<Rule>>,
}

impl Annotation {
    /// Returns true if a rule matched this line.
    pub fn is_match(&self) -> bool {
        self.rule.is_some()
    }

    /// Label of the matched rule, if any.
    pub fn label(&self) -> Option<&str> {
        self.rule.as_deref().map(Rule::label)
    }
}

// =============================================================================
// Annotated document (load/highlight view)
// =============================================================================

/// Every line of an input, in order, each with its classification.
///
/// Built fresh on every load; never updated incrementally.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedDocument {
    pub annotations: Vec<Annotation>,
}

impl AnnotatedDocument {
    /// Number of lines in the document (matched and unmatched).
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Number of lines claimed by some rule.
    pub fn matched_count(&self) -> usize {
        self.annotations.iter().filter(|a| a.is_match()).count()
    }
}

impl<'a> IntoIterator for &'a AnnotatedDocument {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

// =============================================================================
// Match report (analyze view)
// =============================================================================

/// A matched line in a report. Unlike `Annotation`, the rule is mandatory.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// The line with its original (not renumbered) line number.
    pub line: Line,

    /// The rule that claimed the line.
    pub rule: Arc<Rule>,
}

/// Number of report entries claimed by one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub colour: Rgb,
    pub count: usize,
}
