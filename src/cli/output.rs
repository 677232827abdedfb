//! Output format handling
//!
//! - human: readable, concise output for terminal use
//! - json: stable, machine-readable JSON

use clap::ValueEnum;
use serde::Serialize;

/// Output format for healthgrid commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}
