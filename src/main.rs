//! Healthgrid - personal health tracker CLI
//!
//! Stages daily records into the input area, submits them into date-keyed
//! tables, and keeps the food and drink catalogs and their suggestions in
//! shape.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::{Error as ClapError, ErrorKind};
use clap::Parser;

use cli::{Cli, OutputFormat};
use healthgrid_core::error::{ExitCode as HealthExitCode, HealthError};
use healthgrid_core::logging;

fn main() -> ExitCode {
    let started = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if json_in_argv() => return exit_with(&clap_failure(err), OutputFormat::Json, false),
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("healthgrid: logging disabled ({})", e);
    }
    tracing::debug!(elapsed = ?started.elapsed(), "arguments parsed");

    match commands::dispatch::run(&cli, started) {
        Ok(()) => ExitCode::from(HealthExitCode::Success as u8),
        Err(e) => exit_with(&e, cli.format, cli.quiet),
    }
}

/// Map a clap failure onto the error envelope used for JSON output.
/// Help and version output still goes through clap.
fn clap_failure(err: ClapError) -> HealthError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => HealthError::UsageError(err.to_string()),
        _ => HealthError::Other(err.to_string()),
    }
}

fn exit_with(error: &HealthError, format: OutputFormat, quiet: bool) -> ExitCode {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    ExitCode::from(error.exit_code() as u8)
}

/// Whether the raw arguments ask for JSON; used when clap rejects them
/// before `Cli.format` is available.
fn json_in_argv() -> bool {
    let args: Vec<String> = env::args().skip(1).collect();
    args.iter().enumerate().any(|(i, arg)| {
        arg == "--format=json" || (arg == "--format" && args.get(i + 1).is_some_and(|v| v == "json"))
    })
}
