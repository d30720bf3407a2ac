// LogWarden - tests/properties.rs
//
// Property-based tests for the classification core: line-count
// preservation, first-match-wins, report/annotation agreement, original
// line numbering, and case-insensitivity.

use logwarden::core::annotate::{annotate, split_lines, AnalysisConfig};
use logwarden::core::model::Rgb;
use logwarden::core::report::MatchReport;
use logwarden::core::rules::{builtin_rules, RuleDef, RuleTable};
use proptest::prelude::*;

const GREY: Rgb = Rgb::new(128, 128, 128);

/// Lines drawn from a mix of suspicious phrases and noise.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("permission denied".to_string()),
        Just("kernel panic - not syncing".to_string()),
        Just("avc: denied { write }".to_string()),
        Just("su command issued".to_string()),
        Just("invalid package name".to_string()),
        Just(String::new()),
        "[a-z0-9 ]{0,40}",
    ]
}

/// Number of lines a reader would see: a trailing terminator does not start
/// a new line, so an unterminated empty last line vanishes.
fn expected_line_count(lines: &[String], trailing_newline: bool) -> usize {
    match lines.last() {
        None => 0,
        Some(last) if last.is_empty() && !trailing_newline => lines.len() - 1,
        Some(_) => lines.len(),
    }
}

proptest! {
    /// annotate() yields exactly one annotation per input line.
    #[test]
    fn prop_annotate_preserves_line_count(
        lines in prop::collection::vec(line_strategy(), 0..60),
        trailing_newline in any::<bool>(),
        crlf in any::<bool>(),
    ) {
        let sep = if crlf { "\r\n" } else { "\n" };
        let mut text = lines.join(sep);
        if trailing_newline && !lines.is_empty() {
            text.push_str(sep);
        }

        let table = builtin_rules().unwrap();
        let doc = table.annotate(&text);
        let expected = expected_line_count(&lines, trailing_newline);

        prop_assert_eq!(doc.len(), expected);
        prop_assert_eq!(split_lines(&text).count(), expected);
    }

    /// The report is the matched subsequence of the annotation, with the
    /// same (original) line numbers.
    #[test]
    fn prop_report_is_matched_subsequence(
        lines in prop::collection::vec(line_strategy(), 0..60),
    ) {
        let text = lines.join("\n");
        let table = builtin_rules().unwrap();
        let doc = table.annotate(&text);
        let report = table.report(&text);

        let from_doc: Vec<(u64, String)> = doc
            .iter()
            .filter_map(|a| a.label().map(|l| (a.line.number, l.to_string())))
            .collect();
        let from_report: Vec<(u64, String)> = report
            .iter()
            .map(|e| (e.line.number, e.rule.label().to_string()))
            .collect();

        prop_assert_eq!(&from_doc, &from_report);
        prop_assert_eq!(report.count(), from_doc.len());
        prop_assert_eq!(report.is_clear(), from_doc.is_empty());

        // Deriving from the document gives the same entries.
        let derived = MatchReport::from_document(&doc);
        prop_assert_eq!(derived.count(), report.count());
    }

    /// Line numbers in a report are strictly increasing and index the
    /// original text.
    #[test]
    fn prop_report_line_numbers_index_original_text(
        lines in prop::collection::vec(line_strategy(), 1..60),
    ) {
        let text = lines.join("\n");
        let report = builtin_rules().unwrap().report(&text);

        let numbers: Vec<u64> = report.iter().map(|e| e.line.number).collect();
        prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        for entry in report.iter() {
            let idx = (entry.line.number - 1) as usize;
            prop_assert_eq!(&entry.line.text, &lines[idx]);
        }
    }

    /// When two rules both match, the earlier one always wins, whatever the
    /// surrounding text.
    #[test]
    fn prop_first_match_wins(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
        let table = RuleTable::new(&[
            RuleDef::new("Early", "denied", GREY),
            RuleDef::new("Late", "access denied", GREY),
        ])
        .unwrap();

        let line = format!("{prefix}access denied{suffix}");
        let rule = table.classify(&line).unwrap();
        prop_assert_eq!(rule.label(), "Early");
        prop_assert_eq!(rule.position(), 0);
    }

    /// Matching ignores ASCII case.
    #[test]
    fn prop_case_insensitive(line in line_strategy()) {
        let table = builtin_rules().unwrap();
        let lower = table.classify(&line.to_lowercase()).map(|r| r.label().to_string());
        let upper = table.classify(&line.to_uppercase()).map(|r| r.label().to_string());
        prop_assert_eq!(lower, upper);
    }

    /// The parallel path returns exactly what the sequential path does.
    #[test]
    fn prop_parallel_matches_sequential(
        lines in prop::collection::vec(line_strategy(), 0..200),
    ) {
        let text = lines.join("\n");
        let table = builtin_rules().unwrap();
        let seq = annotate(table, &text, &AnalysisConfig { parallel_threshold: usize::MAX });
        let par = annotate(table, &text, &AnalysisConfig { parallel_threshold: 0 });

        let seq_view: Vec<(u64, Option<&str>)> =
            seq.iter().map(|a| (a.line.number, a.label())).collect();
        let par_view: Vec<(u64, Option<&str>)> =
            par.iter().map(|a| (a.line.number, a.label())).collect();
        prop_assert_eq!(seq_view, par_view);
    }
}
