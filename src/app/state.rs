// LogWarden - app/state.rs
//
// Application state for the load / analyze / clear workflow. Holds the
// currently loaded log, its annotated document, and the latest report.
// Each load or analysis supersedes the previous result entirely.

use crate::core::annotate::{annotate, AnalysisConfig};
use crate::core::model::AnnotatedDocument;
use crate::core::report::MatchReport;
use crate::core::rules::RuleTable;
use crate::platform::fs::{self, ReadOptions};
use crate::util::constants;
use crate::util::error::AppError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A log that has been read and annotated.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    /// Where the text came from (a file path, or `<stdin>`).
    pub source: PathBuf,

    /// Every line with its classification.
    pub document: AnnotatedDocument,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState<'t> {
    /// The rule table every load is classified against.
    pub rules: &'t RuleTable,

    /// Input decoding limits.
    pub read_options: ReadOptions,

    /// Annotation settings.
    pub analysis: AnalysisConfig,

    /// Currently loaded log (None until a load succeeds).
    pub loaded: Option<LoadedLog>,

    /// Report from the most recent `analyze` call.
    pub report: Option<MatchReport>,

    /// Status message for the caller to display.
    pub status_message: String,
}

impl<'t> AppState<'t> {
    /// Create initial state with nothing loaded.
    pub fn new(rules: &'t RuleTable, read_options: ReadOptions, analysis: AnalysisConfig) -> Self {
        Self {
            rules,
            read_options,
            analysis,
            loaded: None,
            report: None,
            status_message: "Ready. Load a log file to begin.".to_string(),
        }
    }

    /// Read, decode and annotate a log file.
    ///
    /// Previous results are cleared before reading, so a failed load leaves
    /// nothing loaded rather than a stale document.
    pub fn load_file(&mut self, path: &Path) -> Result<&LoadedLog, AppError> {
        self.clear();
        tracing::info!(path = %path.display(), "Loading log file");

        let text = match fs::read_log_file(path, &self.read_options) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load log file");
                self.status_message = e.to_string();
                return Err(e);
            }
        };
        Ok(self.load_text(path.to_path_buf(), &text))
    }

    /// Read, decode and annotate a log from a stream (stdin).
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<&LoadedLog, AppError> {
        self.clear();
        let source = PathBuf::from(constants::STDIN_DISPLAY_NAME);

        let text = match fs::read_log_stream(reader, &source, &self.read_options) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read log stream");
                self.status_message = e.to_string();
                return Err(e);
            }
        };
        Ok(self.load_text(source, &text))
    }

    /// Annotate already-decoded text and make it the loaded log.
    pub fn load_text(&mut self, source: PathBuf, text: &str) -> &LoadedLog {
        self.report = None;
        let document = annotate(self.rules, text, &self.analysis);

        self.status_message = format!(
            "Loaded {} lines from '{}'.",
            document.len(),
            source.display()
        );
        tracing::info!(
            source = %source.display(),
            lines = document.len(),
            matched = document.matched_count(),
            "Log loaded"
        );

        self.loaded.insert(LoadedLog { source, document })
    }

    /// Build the match report for the loaded log.
    ///
    /// Returns `AppError::NoFileLoaded` if nothing has been loaded. Calling
    /// again replaces the previous report.
    pub fn analyze(&mut self) -> Result<&MatchReport, AppError> {
        let Some(loaded) = self.loaded.as_ref() else {
            self.status_message = AppError::NoFileLoaded.to_string();
            return Err(AppError::NoFileLoaded);
        };

        let report = MatchReport::from_document(&loaded.document);
        self.status_message = if report.is_clear() {
            constants::NO_SUSPICIOUS_ACTIVITY_MESSAGE.to_string()
        } else {
            format!("Found {} suspicious entries.", report.count())
        };
        tracing::info!(
            source = %loaded.source.display(),
            matched = report.count(),
            "Analysis complete"
        );

        Ok(&*self.report.insert(report))
    }

    /// Drop the loaded log and any report.
    pub fn clear(&mut self) {
        self.loaded = None;
        self.report = None;
        self.status_message = "Ready.".to_string();
    }
}
