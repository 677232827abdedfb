//! CLI argument parsing for healthgrid
//!
//! Global flags: --root, --store, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod commands;
pub mod output;
pub mod parse;
pub mod paths;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use output::OutputFormat;

/// Healthgrid - personal health tracker over a date-keyed grid
#[derive(Parser, Debug)]
#[command(name = "healthgrid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true, env = "HEALTHGRID_STORE")]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
