// LogWarden - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the rules / load / analyze commands

use clap::{Parser, Subcommand, ValueEnum};
use logwarden::app::state::AppState;
use logwarden::core::annotate::AnalysisConfig;
use logwarden::core::export;
use logwarden::core::rules;
use logwarden::platform::config::{self, AppConfig, PlatformPaths};
use logwarden::platform::fs::ReadOptions;
use logwarden::ui::{render, theme::Theme};
use logwarden::util::constants;
use logwarden::util::error::{ExportError, LogWardenError, Result};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// LogWarden - flag suspicious lines in a log file.
///
/// Every line is checked against a fixed, prioritised set of patterns
/// (permission problems, root access, malware, kernel faults, ...). The
/// first pattern that matches a line decides its category.
#[derive(Parser, Debug)]
#[command(name = "logwarden", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read configuration from this file instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Refuse input that is not valid UTF-8 instead of replacing bad bytes.
    #[arg(long = "strict-utf8", global = true)]
    strict_utf8: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the pattern legend (categories in priority order).
    Rules,

    /// Print the whole log with suspicious lines highlighted.
    Load {
        /// Log file to read ("-" for stdin).
        input: PathBuf,
    },

    /// Report only the suspicious lines, with their line numbers.
    ///
    /// Exits 0 when nothing was found and 1 when entries were reported.
    Analyze {
        /// Log file to read ("-" for stdin).
        input: PathBuf,

        /// Output format.
        #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to this file instead of stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Append per-category counts (text format only; ignored with a
        /// warning for csv and json).
        #[arg(short = 's', long = "summary")]
        summary: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Config comes first so its [logging] level can feed the subscriber.
    let (config_path, app_config, config_warnings, config_error) = match cli.config {
        Some(ref path) => match config::load_config_file(path) {
            Ok((c, w)) => (path.clone(), c, w, None),
            Err(e) => (path.clone(), AppConfig::default(), Vec::new(), Some(e)),
        },
        None => {
            let paths = PlatformPaths::resolve();
            let (c, w) = config::load_config(&paths.config_dir);
            (paths.config_file(), c, w, None)
        }
    };

    logwarden::util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LogWarden starting"
    );

    if let Some(e) = config_error {
        tracing::error!(error = %e, "Failed to load configuration");
        eprintln!("Error: {}", LogWardenError::from(e));
        std::process::exit(constants::EXIT_ERROR);
    }
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
        eprintln!("Warning: {warning}");
    }

    let code = match run(&cli, &app_config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            constants::EXIT_ERROR
        }
    };
    std::process::exit(code);
}

/// Execute the parsed command, returning the process exit code.
fn run(cli: &Cli, app_config: &AppConfig) -> Result<i32> {
    // A broken built-in table is a bug; refuse to run with a partial one.
    let rules = rules::builtin_rules()?;

    let stdout = io::stdout();
    let color = !cli.no_color && app_config.color.enabled(stdout.is_terminal());
    let theme = Theme::new(color);
    let mut out = BufWriter::new(stdout.lock());

    let read_options = ReadOptions {
        max_size: app_config.max_input_file_size,
        lossy: !cli.strict_utf8 && app_config.lossy_utf8,
    };
    let analysis = AnalysisConfig {
        parallel_threshold: app_config.parallel_threshold,
    };
    let mut state = AppState::new(rules, read_options, analysis);

    match &cli.command {
        Command::Rules => {
            render::render_legend(&mut out, rules, &theme).map_err(stdout_err)?;
            out.flush().map_err(stdout_err)?;
            Ok(constants::EXIT_CLEAR)
        }

        Command::Load { input } => {
            let loaded = load(&mut state, input)?;
            render::render_document(&mut out, &loaded.document, &theme).map_err(stdout_err)?;
            out.flush().map_err(stdout_err)?;
            Ok(constants::EXIT_CLEAR)
        }

        Command::Analyze {
            input,
            format,
            output,
            summary,
        } => {
            let summary = effective_summary(*format, *summary);
            load(&mut state, input)?;
            let source = state
                .loaded
                .as_ref()
                .map(|l| l.source.display().to_string())
                .unwrap_or_default();
            let report = state.analyze()?;

            match output {
                Some(path) => {
                    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                    let mut writer = BufWriter::new(file);
                    // Colour never goes into files.
                    write_report(
                        &mut writer,
                        path,
                        *format,
                        summary,
                        &source,
                        report,
                        rules,
                        &Theme::new(false),
                    )?;
                    writer.flush().map_err(|e| ExportError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                    tracing::info!(path = %path.display(), "Report written");
                }
                None => {
                    let stdout_path = PathBuf::from("<stdout>");
                    write_report(
                        &mut out,
                        &stdout_path,
                        *format,
                        summary,
                        &source,
                        report,
                        rules,
                        &theme,
                    )?;
                    out.flush().map_err(stdout_err)?;
                }
            }

            Ok(if report.is_clear() {
                constants::EXIT_CLEAR
            } else {
                constants::EXIT_SUSPICIOUS
            })
        }
    }
}

/// Load from a file, or from stdin when the path is "-".
fn load<'s>(
    state: &'s mut AppState<'_>,
    input: &Path,
) -> Result<&'s logwarden::app::state::LoadedLog> {
    let loaded = if input == Path::new(constants::STDIN_PATH) {
        state.load_reader(io::stdin().lock())?
    } else {
        state.load_file(input)?
    };
    Ok(loaded)
}

/// `--summary` only shapes text output. Other formats drop it, with a warning.
fn effective_summary(format: OutputFormat, summary: bool) -> bool {
    if summary && format != OutputFormat::Text {
        tracing::warn!(?format, "--summary has no effect on this format");
        eprintln!("Warning: --summary only applies to --format text; ignoring it.");
        return false;
    }
    summary
}

#[allow(clippy::too_many_arguments)]
fn write_report<W: Write>(
    writer: &mut W,
    path: &Path,
    format: OutputFormat,
    summary: bool,
    source: &str,
    report: &logwarden::core::report::MatchReport,
    rules: &rules::RuleTable,
    theme: &Theme,
) -> Result<()> {
    let write_err = |e: io::Error| LogWardenError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    };

    match format {
        OutputFormat::Text => {
            render::render_report(writer, report, theme).map_err(write_err)?;
            if summary {
                writeln!(writer).map_err(write_err)?;
                render::render_summary(writer, &report.category_counts(rules), theme)
                    .map_err(write_err)?;
            }
        }
        OutputFormat::Csv => {
            export::export_csv(report, &mut *writer, path)?;
        }
        OutputFormat::Json => {
            export::export_json(report, source, chrono::Utc::now(), &mut *writer, path)?;
            writeln!(writer).map_err(write_err)?;
        }
    }
    Ok(())
}

fn stdout_err(e: io::Error) -> LogWardenError {
    LogWardenError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source: e,
    }
}
