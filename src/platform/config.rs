// LogWarden - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.
//
// The rule table is compiled in and is deliberately NOT configurable here.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogWarden configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logwarden/ or %APPDATA%\LogWarden\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Colour mode: "auto", "always", or "never".
    pub color: Option<String>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Refuse log files larger than this.
    pub max_file_size_bytes: Option<u64>,
    /// Replace invalid UTF-8 (default true). False refuses such files.
    pub lossy_utf8: Option<bool>,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Line count at which classification goes parallel.
    pub parallel_threshold: Option<usize>,
}

/// When to emit ANSI colour in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the output is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Colour mode for rendered output.
    pub color: ColorMode,
    /// Maximum input size in bytes.
    pub max_input_file_size: u64,
    /// Lossy UTF-8 decoding.
    pub lossy_utf8: bool,
    /// Parallel classification threshold (lines).
    pub parallel_threshold: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            color: ColorMode::Auto,
            max_input_file_size: constants::DEFAULT_MAX_INPUT_FILE_SIZE,
            lossy_utf8: true,
            parallel_threshold: constants::DEFAULT_PARALLEL_LINE_THRESHOLD,
        }
    }
}

/// Load `config.toml` from the platform config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// so the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!(
                "{e}. Using defaults. See config.example.toml for the expected format."
            );
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load an explicitly named config file.
///
/// Unlike [`load_config`], a missing or malformed file is an error: the
/// user asked for this file by name.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- UI: color --
    if let Some(ref color) = raw.ui.color {
        match color.to_lowercase().as_str() {
            "auto" => config.color = ColorMode::Auto,
            "always" => config.color = ColorMode::Always,
            "never" => config.color = ColorMode::Never,
            other => warnings.push(format!(
                "[ui] color = \"{other}\" is not recognised. \
                 Expected \"auto\", \"always\" or \"never\". Using default (auto).",
            )),
        }
    }

    // -- Input: max_file_size_bytes --
    if let Some(size) = raw.input.max_file_size_bytes {
        if (constants::MIN_MAX_INPUT_FILE_SIZE..=constants::ABSOLUTE_MAX_INPUT_FILE_SIZE)
            .contains(&size)
        {
            config.max_input_file_size = size;
        } else {
            warnings.push(format!(
                "[input] max_file_size_bytes = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_INPUT_FILE_SIZE,
                constants::ABSOLUTE_MAX_INPUT_FILE_SIZE,
                constants::DEFAULT_MAX_INPUT_FILE_SIZE,
            ));
        }
    }

    // -- Input: lossy_utf8 --
    if let Some(lossy) = raw.input.lossy_utf8 {
        config.lossy_utf8 = lossy;
    }

    // -- Analysis: parallel_threshold --
    if let Some(threshold) = raw.analysis.parallel_threshold {
        if threshold >= constants::MIN_PARALLEL_LINE_THRESHOLD {
            config.parallel_threshold = threshold;
        } else {
            warnings.push(format!(
                "[analysis] parallel_threshold = {threshold} is below the minimum ({}). \
                 Using default ({}).",
                constants::MIN_PARALLEL_LINE_THRESHOLD,
                constants::DEFAULT_PARALLEL_LINE_THRESHOLD,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
