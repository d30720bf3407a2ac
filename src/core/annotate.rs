// LogWarden - core/annotate.rs
//
// Line splitting and whole-document annotation (the load/highlight view).
// Core layer: accepts already-decoded text, never touches the filesystem.

use crate::core::model::{AnnotatedDocument, Annotation, Line};
use crate::core::rules::RuleTable;
use crate::util::constants;
use rayon::prelude::*;

/// Configuration for annotation passes.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Inputs with at least this many lines are classified on the rayon
    /// pool. Output is identical either way.
    pub parallel_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: constants::DEFAULT_PARALLEL_LINE_THRESHOLD,
        }
    }
}

// =============================================================================
// Line splitting
// =============================================================================

/// Iterator over the lines of a text.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line. The terminator is
/// removed; nothing else is. A terminator at the very end of the text does
/// not start another line, so `"a\n"` is one line and `""` is none.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(|c: char| c == '\n' || c == '\r') {
            Some(idx) => {
                let line = &self.rest[..idx];
                let bytes = self.rest.as_bytes();
                let terminator_len = if bytes[idx] == b'\r' && bytes.get(idx + 1) == Some(&b'\n')
                {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[idx + terminator_len..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Split `text` into lines. See [`Lines`].
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

// =============================================================================
// Annotation
// =============================================================================

/// Classify every line of `text`, keeping unmatched lines.
///
/// Line numbers start at 1 and follow input order exactly.
pub fn annotate(table: &RuleTable, text: &str, config: &AnalysisConfig) -> AnnotatedDocument {
    let lines: Vec<&str> = split_lines(text).collect();

    let annotate_line = |(idx, line): (usize, &&str)| Annotation {
        line: Line {
            number: idx as u64 + 1,
            text: (*line).to_string(),
        },
        rule: table.classify(line).cloned(),
    };

    let annotations: Vec<Annotation> = if lines.len() >= config.parallel_threshold {
        tracing::debug!(lines = lines.len(), "Annotating on the rayon pool");
        // Indexed parallel collect keeps input order.
        lines.par_iter().enumerate().map(annotate_line).collect()
    } else {
        lines.iter().enumerate().map(annotate_line).collect()
    };

    let document = AnnotatedDocument { annotations };
    tracing::debug!(
        lines = document.len(),
        matched = document.matched_count(),
        "Document annotated"
    );
    document
}

impl RuleTable {
    /// Annotate `text` with default settings. See [`annotate`].
    pub fn annotate(&self, text: &str) -> AnnotatedDocument {
        annotate(self, text, &AnalysisConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
