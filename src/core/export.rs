// LogWarden - core/export.rs
//
// CSV and JSON export of match reports.
// Core layer: writes to any Write trait object.

use crate::core::report::MatchReport;
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON document shape for an exported report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    generated_at: DateTime<Utc>,
    count: usize,
    entries: Vec<JsonEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    line: u64,
    category: &'a str,
    text: &'a str,
}

fn check_size(report: &MatchReport) -> Result<(), ExportError> {
    if report.count() > constants::MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count: report.count(),
            max: constants::MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export a report to CSV.
///
/// Writes: line, category, text. A clear report produces the header only.
pub fn export_csv<W: Write>(
    report: &MatchReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(report)?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["line", "category", "text"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for entry in report {
        csv_writer
            .write_record([
                entry.line.number.to_string().as_str(),
                entry.rule.label(),
                entry.line.text.as_str(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %export_path.display(), count, "CSV export complete");
    Ok(count)
}

/// Export a report to JSON (a single object with an `entries` array).
///
/// `source` names the analysed log; `generated_at` is stamped into the
/// document so callers control the clock.
pub fn export_json<W: Write>(
    report: &MatchReport,
    source: &str,
    generated_at: DateTime<Utc>,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(report)?;

    let doc = JsonReport {
        source,
        generated_at,
        count: report.count(),
        entries: report
            .iter()
            .map(|e| JsonEntry {
                line: e.line.number,
                category: e.rule.label(),
                text: &e.line.text,
            })
            .collect(),
    };

    serde_json::to_writer_pretty(writer, &doc).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %export_path.display(), count = doc.count, "JSON export complete");
    Ok(doc.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::builtin_rules;
    use chrono::TimeZone;

    fn sample_report() -> MatchReport {
        builtin_rules()
            .unwrap()
            .report("boot ok\nPermission denied, retrying\nsegfault at 0x0\n")
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&sample_report(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "line,category,text");
        assert_eq!(lines[1], "2,Permission Issues,\"Permission denied, retrying\"");
        assert_eq!(lines[2], "3,Kernel Issues,segfault at 0x0");
    }

    #[test]
    fn test_csv_export_clear_report_is_header_only() {
        let mut buf = Vec::new();
        let count = export_csv(&MatchReport::default(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "line,category,text\n");
    }

    #[test]
    fn test_json_export() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 22).unwrap();
        let mut buf = Vec::new();
        let count = export_json(&sample_report(), "device.log", ts, &mut buf, Path::new("out.json"))
            .unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["source"], "device.log");
        assert_eq!(value["generated_at"], "2024-01-15T14:30:22Z");
        assert_eq!(value["count"], 2);
        assert_eq!(value["entries"][0]["line"], 2);
        assert_eq!(value["entries"][0]["category"], "Permission Issues");
        assert_eq!(value["entries"][1]["text"], "segfault at 0x0");
    }
}
