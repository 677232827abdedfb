//! `healthgrid preview refresh` and `healthgrid dates fill|reset`

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;

fn report(cli: &Cli, status: &str, message: &str) -> Result<()> {
    output_by_format_result!(cli.format,
        json => print_json_status(status, Some(message), &[]),
        human => {
            if !cli.quiet {
                println!("{}", message);
            }
        }
    )
}

pub fn execute_refresh(cli: &Cli, store: &mut Store) -> Result<()> {
    let clock = SystemClock;
    with_document_lock(cli, store, |store| store.engine(&clock).refresh_today_previews())?;
    report(cli, "refreshed", "Previews refreshed for today")
}

pub fn execute_fill_dates(cli: &Cli, store: &mut Store) -> Result<()> {
    let clock = SystemClock;
    with_document_lock(cli, store, |store| store.engine(&clock).ensure_dates_present())?;
    report(cli, "filled", "Blank input dates set to today")
}

pub fn execute_reset_dates(cli: &Cli, store: &mut Store) -> Result<()> {
    let clock = SystemClock;
    with_document_lock(cli, store, |store| store.engine(&clock).reset_date_inputs())?;
    report(cli, "reset", "Input dates reset and previews cleared")
}
