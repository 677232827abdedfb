//! `healthgrid autocomplete setup`

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;

pub fn execute_setup(cli: &Cli, store: &mut Store) -> Result<()> {
    let clock = SystemClock;
    let (names, slots) = with_document_lock(cli, store, |store| {
        let mut engine = store.engine(&clock);
        let names = engine.setup_autocomplete()?;
        Ok((names, engine.autocomplete().slots()))
    })?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            None,
            &[("names", json!(names)), ("slots", json!(slots))],
        ),
        human => {
            if !cli.quiet {
                println!("Autocomplete ready: {} names across {} slots", names, slots);
            }
        }
    )
}
