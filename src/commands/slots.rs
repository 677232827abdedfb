//! `healthgrid slots` and `healthgrid dose` - supplement and skincare setup

use serde_json::json;

use crate::cli::args::{DoseArgs, SlotsArgs};
use crate::cli::Cli;
use crate::commands::format::{cell_json, output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::grid::parse_cell;
use healthgrid_core::store::Store;

pub fn execute_names(cli: &Cli, store: &mut Store, args: &SlotsArgs) -> Result<()> {
    let clock = SystemClock;
    with_document_lock(cli, store, |store| {
        store.engine(&clock).set_slot_names(args.family, &args.names)
    })?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            None,
            &[("family", json!(args.family)), ("slots", json!(args.names))],
        ),
        human => {
            if !cli.quiet {
                println!("{} slots: {}", args.family.label(), args.names.join(", "));
            }
        }
    )
}

pub fn execute_dose(cli: &Cli, store: &mut Store, args: &DoseArgs) -> Result<()> {
    let dose = parse_cell(&args.dose);
    let clock = SystemClock;
    let row = with_document_lock(cli, store, |store| {
        store.engine(&clock).set_dose(&args.name, dose.clone())
    })?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            None,
            &[
                ("name", json!(args.name.trim())),
                ("dose", cell_json(&dose)),
                ("row", json!(row)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("{}: {}", args.name.trim(), dose);
            }
        }
    )
}
