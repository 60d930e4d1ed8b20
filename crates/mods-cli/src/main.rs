//! MODS generator CLI.

use clap::{ColorChoice, Parser};
use mods_cli::logging::{LogConfig, LogFormat, init_logging};
use mods_cli::pipeline::{RunOptions, run};
use mods_ingest::RecordKind;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg, RecordKindArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let options = RunOptions {
        dataset: cli.dataset,
        output_dir: cli.output_dir,
        kind: match cli.kind {
            RecordKindArg::Parent => RecordKind::Parent,
            RecordKindArg::Child => RecordKind::Child,
        },
        ctrl_row: cli.ctrl_row,
        force_dates: cli.force_dates,
        copy_parent_to_children: cli.copy_parent_to_children,
        separator: cli.separator,
        dry_run: cli.dry_run,
    };
    let exit_code = match run(&options) {
        Ok(result) => {
            print_summary(&result);
            if result.has_errors() { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
