// LogWarden - core/report.rs
//
// Match report generation (the analyze view): matched lines only, original
// line numbers and order preserved, plus per-category tallies.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::annotate::{annotate, AnalysisConfig};
use crate::core::model::{AnnotatedDocument, CategoryCount, ReportEntry};
use crate::core::rules::RuleTable;
use crate::util::logging;

/// Matched lines of a document, in their original order.
///
/// An empty report is the "no suspicious activity found" state; callers
/// should check [`MatchReport::is_clear`] and render it as a positive
/// result rather than as an empty listing.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    pub entries: Vec<ReportEntry>,
}

impl MatchReport {
    /// Derive a report from an existing annotation pass.
    ///
    /// Unmatched lines are dropped; line numbers are not renumbered.
    pub fn from_document(document: &AnnotatedDocument) -> Self {
        let entries = document
            .iter()
            .filter_map(|annotation| {
                annotation.rule.as_ref().map(|rule| {
                    tracing::trace!(
                        line = annotation.line.number,
                        category = rule.label(),
                        text = logging::preview(&annotation.line.text),
                        "Suspicious line"
                    );
                    ReportEntry {
                        line: annotation.line.clone(),
                        rule: rule.clone(),
                    }
                })
            })
            .collect();
        Self { entries }
    }

    /// Total number of matched entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing matched: the "no suspicious activity found" state.
    pub fn is_clear(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry> {
        self.entries.iter()
    }

    /// Entry tallies for every rule in `table`, in table order.
    ///
    /// Rules that claimed nothing are included with a zero count, so a
    /// shadowed rule shows up as such.
    pub fn category_counts(&self, table: &RuleTable) -> Vec<CategoryCount> {
        let mut counts = vec![0usize; table.len()];
        for entry in &self.entries {
            if let Some(slot) = counts.get_mut(entry.rule.position()) {
                *slot += 1;
            }
        }

        table
            .rules()
            .iter()
            .zip(counts)
            .map(|(rule, count)| CategoryCount {
                label: rule.label().to_string(),
                colour: rule.colour(),
                count,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MatchReport {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the match report for `text` in one pass.
///
/// Equivalent to annotating and then calling [`MatchReport::from_document`].
/// Holds no state between calls.
pub fn report(table: &RuleTable, text: &str, config: &AnalysisConfig) -> MatchReport {
    let report = MatchReport::from_document(&annotate(table, text, config));
    tracing::debug!(matched = report.count(), "Report generated");
    report
}

impl RuleTable {
    /// Report `text` with default settings. See [`report`].
    pub fn report(&self, text: &str) -> MatchReport {
        report(self, text, &AnalysisConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Rgb;
    use crate::core::rules::{builtin_rules, RuleDef};

    fn summary(report: &MatchReport) -> Vec<(u64, String, String)> {
        report
            .iter()
            .map(|e| (e.line.number, e.line.text.clone(), e.rule.label().to_string()))
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let text = [
            "normal boot",
            "avc: denied { read } scontext=u:r:app:s0",
            "kernel panic - not syncing",
            "normal shutdown",
        ]
        .join("\n");
        let report = builtin_rules().unwrap().report(&text);

        assert_eq!(report.count(), 2);
        assert!(!report.is_clear());
        assert_eq!(
            summary(&report),
            vec![
                (
                    2,
                    "avc: denied { read } scontext=u:r:app:s0".to_string(),
                    "Permission Issues".to_string()
                ),
                (
                    3,
                    "kernel panic - not syncing".to_string(),
                    "Kernel Issues".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_original_line_numbers_preserved() {
        let text: String = (1..=20)
            .map(|n| match n {
                5 => "5: segfault at 0000\n".to_string(),
                12 => "12: malware detected\n".to_string(),
                _ => format!("{n}: routine\n"),
            })
            .collect();
        let report = builtin_rules().unwrap().report(&text);

        let numbers: Vec<u64> = report.iter().map(|e| e.line.number).collect();
        assert_eq!(numbers, vec![5, 12]);
    }

    #[test]
    fn test_report_matches_annotation_subset() {
        let table = builtin_rules().unwrap();
        let text = "a\nPermission denied\nb\nbackdoor installed\nc\nroot access granted\n";
        let doc = table.annotate(text);
        let report = table.report(text);

        let from_doc: Vec<(u64, Option<&str>)> = doc
            .iter()
            .filter(|a| a.is_match())
            .map(|a| (a.line.number, a.label()))
            .collect();
        let from_report: Vec<(u64, Option<&str>)> = report
            .iter()
            .map(|e| (e.line.number, Some(e.rule.label())))
            .collect();
        assert_eq!(from_doc, from_report);
        assert_eq!(report.count(), doc.matched_count());
    }

    #[test]
    fn test_report_is_idempotent() {
        let table = builtin_rules().unwrap();
        let text = "trojan\nnothing\nsu command\n";
        assert_eq!(summary(&table.report(text)), summary(&table.report(text)));
    }

    #[test]
    fn test_no_match_is_clear() {
        let report = builtin_rules().unwrap().report("all good\nstill good\n");
        assert!(report.is_clear());
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_empty_text_is_clear() {
        let table = builtin_rules().unwrap();
        assert!(table.annotate("").is_empty());
        let report = table.report("");
        assert!(report.is_clear());
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_category_counts_in_table_order() {
        let table = RuleTable::new(&[
            RuleDef::new("A", "alpha", Rgb::new(1, 1, 1)),
            RuleDef::new("B", "beta", Rgb::new(2, 2, 2)),
            RuleDef::new("C", "gamma", Rgb::new(3, 3, 3)),
        ])
        .unwrap();
        let report = table.report("beta\nalpha\nbeta\nnone\n");
        let counts = report.category_counts(&table);

        let flat: Vec<(&str, usize)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(flat, vec![("A", 1), ("B", 2), ("C", 0)]);
        assert_eq!(counts[1].colour, Rgb::new(2, 2, 2));
    }

    #[test]
    fn test_shadowed_rule_counts_zero() {
        let table = builtin_rules().unwrap();
        let report = table.report("avc: denied { write }\navc: denied { open }\n");
        let counts = report.category_counts(table);
        let selinux = counts.iter().find(|c| c.label == "SELinux Denials").unwrap();
        let perm = counts.iter().find(|c| c.label == "Permission Issues").unwrap();
        assert_eq!(selinux.count, 0);
        assert_eq!(perm.count, 2);
    }
}
