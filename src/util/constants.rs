// LogWarden - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogWarden";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogWarden";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Rule table limits
// =============================================================================

/// Maximum regex pattern length for a classification rule.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

/// Upper bound on the compiled size of a single rule's regex (bytes).
/// Passed to `RegexBuilder::size_limit`.
pub const MAX_REGEX_COMPILED_SIZE: usize = 1024 * 1024; // 1 MiB

// =============================================================================
// Analysis
// =============================================================================

/// Line count at or above which classification is spread across the rayon
/// thread pool. Below this the sequential path is faster.
pub const DEFAULT_PARALLEL_LINE_THRESHOLD: usize = 50_000;

/// Smallest configurable parallel threshold.
pub const MIN_PARALLEL_LINE_THRESHOLD: usize = 1_000;

/// Message shown when a report contains no matched lines.
pub const NO_SUSPICIOUS_ACTIVITY_MESSAGE: &str = "No suspicious activity found!";

// =============================================================================
// Input limits
// =============================================================================

/// Default maximum size of a log file that will be loaded into memory.
/// Files are read whole; there is no streaming path.
pub const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 256 * 1024 * 1024; // 256 MiB

/// Smallest configurable input size cap.
pub const MIN_MAX_INPUT_FILE_SIZE: u64 = 1024; // 1 KiB

/// Hard upper bound on the input size cap.
pub const ABSOLUTE_MAX_INPUT_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4 GiB

/// Pseudo-path accepted on the command line to read from stdin.
pub const STDIN_PATH: &str = "-";

/// Display name used for text read from stdin.
pub const STDIN_DISPLAY_NAME: &str = "<stdin>";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Diagnostics go to stderr; stdout carries the rendered
/// document or report, so the default stays quiet.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of report entries that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Exit codes
// =============================================================================

/// Analysis completed and found nothing suspicious.
pub const EXIT_CLEAR: i32 = 0;

/// Analysis completed and found at least one suspicious entry.
pub const EXIT_SUSPICIOUS: i32 = 1;

/// Any error (I/O, encoding, configuration, export).
pub const EXIT_ERROR: i32 = 2;
