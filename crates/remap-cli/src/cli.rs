//! CLI argument definitions for the header remapper.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "remap",
    version,
    about = "Header remapper - reconcile extra and missing columns, then download the merged CSV",
    long_about = "Reconcile the extra and missing column headers of an uploaded file.\n\n\
                  Mappings are replayed as drag-and-drop gestures against a mapping session,\n\
                  then sent to the merge service which returns the merged CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Settings file (default: the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare guideline headers with the headers of an input file.
    Compare(CompareArgs),

    /// Map headers and download the merged CSV for one file.
    Merge(MergeArgs),

    /// Update the saved client settings.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Expected headers, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub guideline: Vec<String>,

    /// Headers found in the input file, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub input: Vec<String>,

    /// Print the comparison as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Identifier of the uploaded file on the merge service.
    #[arg(long = "file-id", value_name = "ID")]
    pub file_id: String,

    /// Original name of the uploaded file; the download is named after it.
    #[arg(long, value_name = "NAME")]
    pub filename: String,

    /// Expected headers; with --input the lists are derived by comparison.
    #[arg(
        long,
        value_delimiter = ',',
        requires = "input",
        conflicts_with_all = ["extra", "missing", "matched"]
    )]
    pub guideline: Vec<String>,

    /// Headers found in the input file (used with --guideline).
    #[arg(long, value_delimiter = ',', requires = "guideline")]
    pub input: Vec<String>,

    /// Unmapped headers present in the input but not expected.
    #[arg(long, value_delimiter = ',')]
    pub extra: Vec<String>,

    /// Expected headers absent from the input.
    #[arg(long, value_delimiter = ',')]
    pub missing: Vec<String>,

    /// Headers already matched by the comparison.
    #[arg(long, value_delimiter = ',')]
    pub matched: Vec<String>,

    /// Mapping to apply, as EXTRA=MISSING (repeatable).
    #[arg(long = "map", value_name = "EXTRA=MISSING", value_parser = parse_pair)]
    pub map: Vec<(String, String)>,

    /// JSON file with an object of extra header to missing header.
    #[arg(long = "mapping-file", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Undo this many of the most recent mappings before downloading.
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Merge service base URL (overrides settings).
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Directory the merged CSV is saved into (overrides settings).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides settings).
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Print the request payload without contacting the merge service.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Merge service base URL.
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Directory merged files are saved into.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

/// Parse an `EXTRA=MISSING` pair.
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (extra, missing) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected EXTRA=MISSING, got '{raw}'"))?;
    if extra.is_empty() || missing.is_empty() {
        return Err(format!("both sides of '{raw}' must be non-empty"));
    }
    Ok((extra.to_string(), missing.to_string()))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Logging setup for these flags. An explicit `--log-level` beats `-v`/`-q`,
    /// and either disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.verbosity.is_present() || self.log_level.is_some();
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: self
                .log_level
                .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from),
            use_env_filter: !explicit,
            with_timestamps: self.log_timestamps,
            with_target: self.log_target,
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
        }
    }
}
