// LogWarden - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. All errors preserve the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogWarden operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogWardenError {
    /// Rule table construction failed.
    Rule(RuleError),

    /// Loading or analysing a log failed.
    App(AppError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// I/O error with path context (e.g. writing rendered output).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogWardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(e) => write!(f, "Rule table error: {e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogWardenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rule(e) => Some(e),
            Self::App(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

/// Errors raised while building a rule table.
///
/// Any of these prevents the table from being constructed; a bad rule is
/// never silently dropped.
#[derive(Debug, Clone)]
pub enum RuleError {
    /// A rule definition has an empty label or pattern.
    MissingField {
        position: usize,
        field: &'static str,
    },

    /// A rule's pattern failed to compile.
    InvalidRegex {
        label: String,
        pattern: String,
        source: regex::Error,
    },

    /// A rule's pattern exceeds the maximum allowed length.
    RegexTooLong {
        label: String,
        length: usize,
        max_length: usize,
    },

    /// Two rules share the same label. Labels key caller-side styling so
    /// they must be unique.
    DuplicateLabel {
        label: String,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { position, field } => {
                write!(f, "Rule #{position}: missing required field '{field}'")
            }
            Self::InvalidRegex {
                label,
                pattern,
                source,
            } => write!(f, "Rule '{label}': invalid regex '{pattern}': {source}"),
            Self::RegexTooLong {
                label,
                length,
                max_length,
            } => write!(
                f,
                "Rule '{label}': pattern is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::DuplicateLabel {
                label,
                first,
                second,
            } => write!(
                f,
                "Duplicate rule label '{label}' at positions {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RuleError> for LogWardenError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

// ---------------------------------------------------------------------------
// Application errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the load/analyze workflow.
#[derive(Debug)]
pub enum AppError {
    /// `analyze` was requested before any log was loaded.
    NoFileLoaded,

    /// The log file could not be opened or read.
    Io { path: PathBuf, source: io::Error },

    /// The log file exceeds the configured size cap.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The log file is not valid UTF-8 and strict decoding was requested.
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFileLoaded => write!(f, "No log file loaded!"),
            Self::Io { path, source } => {
                write!(f, "Error loading file '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Log file '{}' is {size} bytes, exceeds maximum of {max_size} bytes. \
                 Raise [input] max_file_size_bytes in config to load it.",
                path.display()
            ),
            Self::Encoding { path, source } => write!(
                f,
                "'{}': invalid UTF-8 encoding: {source}. \
                 Drop --strict-utf8 or set [input] lossy_utf8 = true to load it anyway.",
                path.display()
            ),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encoding { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<AppError> for LogWardenError {
    fn from(e: AppError) -> Self {
        Self::App(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum entry count.
    TooManyEntries { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyEntries { count, max } => write!(
                f,
                "Export of {count} entries exceeds maximum of {max}."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LogWardenError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogWardenError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogWarden results.
pub type Result<T> = std::result::Result<T, LogWardenError>;
