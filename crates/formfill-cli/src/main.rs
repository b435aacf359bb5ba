//! Spreadsheet-to-PDF form filler CLI.

use clap::{ColorChoice, Parser};
use formfill_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_fill, run_inspect, run_profile};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Fill(args) => match run_fill(&args) {
            Ok(report) => {
                print_summary(&report);
                if report.has_failures() { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => exit_code(run_inspect(&args)),
        Command::Profile => exit_code(run_profile()),
    };
    std::process::exit(exit_code);
}

fn exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
