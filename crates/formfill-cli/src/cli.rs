//! CLI argument definitions for the form filler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

/// Spreadsheet read when `--input` is not given.
pub const DEFAULT_INPUT: &str = "PDF Source.xlsx";
/// Template used when `--template` is not given.
pub const DEFAULT_TEMPLATE: &str = "Form 8936 Schedule A Clean Vehicle Credit Amount (2023).pdf";
/// Output directory used when `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "formfill",
    version,
    about = "Fill one PDF form per spreadsheet row",
    long_about = "Fill a fillable PDF template once per spreadsheet row.\n\n\
                  Columns are mapped to form fields by a mapping profile; the built-in\n\
                  profile targets IRS Form 8936 Schedule A (2023)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Include cell values in trace-level logs.
    ///
    /// Rows typically carry names and taxpayer identification numbers, so
    /// values are redacted unless this flag is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill the template once per spreadsheet row.
    Fill(FillArgs),

    /// List the form fields of a template.
    Inspect(InspectArgs),

    /// Print the built-in mapping profile as TOML.
    Profile,
}

#[derive(Parser)]
pub struct FillArgs {
    /// Spreadsheet with one record per row (xlsx, xlsm, xlsb, xls, ods or csv).
    #[arg(long = "input", value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Fillable PDF template.
    #[arg(long = "template", value_name = "PATH", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Directory for the filled documents (created if absent).
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Worksheet to read (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Mapping profile TOML (default: built-in Form 8936 Schedule A profile).
    #[arg(long = "profile", value_name = "PROFILE.toml")]
    pub profile: Option<PathBuf>,

    /// Stop at the first row that fails to fill or write.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Resolve every row and report issues without writing documents.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Fillable PDF template.
    #[arg(long = "template", value_name = "PATH", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Print the field list as JSON.
    #[arg(long = "json")]
    pub json: bool,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
