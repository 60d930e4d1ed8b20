//! CLI argument definitions for the MODS generator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mods-gen",
    version,
    about = "Generate MODS XML metadata from tabular datasets",
    long_about = "Generate MODS XML metadata records from tabular datasets.\n\n\
                  A control row in the dataset maps columns to MODS element\n\
                  paths; every data row becomes one .mods file."
)]
pub struct Cli {
    /// Path to the dataset file (delimited text).
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Output directory for generated .mods files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "mods_files")]
    pub output_dir: PathBuf,

    /// Whether rows describe parent objects or children of parents.
    #[arg(long = "type", value_enum, default_value = "parent")]
    pub kind: RecordKindArg,

    /// 1-based row carrying the column-to-element mapping paths.
    #[arg(long = "ctrl-row", value_name = "ROW", default_value_t = 2)]
    pub ctrl_row: usize,

    /// Normalize ambiguous date readings instead of leaving them as-is.
    #[arg(long = "force-dates")]
    pub force_dates: bool,

    /// Merge each child record into a copy of its parent's document.
    ///
    /// The parent's .mods file is looked up in the output directory by
    /// the child's id. Child values override matching parent fields;
    /// untouched parent fields are inherited.
    #[arg(long = "copy-parent-to-children")]
    pub copy_parent_to_children: bool,

    /// Separator between repeated values within one cell.
    #[arg(long = "separator", value_name = "SEP", default_value = "||")]
    pub separator: String,

    /// Parse and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecordKindArg {
    Parent,
    Child,
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
