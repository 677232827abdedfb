//! `healthgrid enter` - stage values into a family's input record

use serde_json::json;

use crate::cli::args::EnterArgs;
use crate::cli::parse::parse_values;
use crate::cli::Cli;
use crate::commands::format::{cells_json, output_by_format_result, print_json_status};
use crate::commands::submit::print_outcome;
use crate::commands::with_document_lock;
use healthgrid_core::bail_usage;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::grid::parse_cell;
use healthgrid_core::store::Store;

pub fn execute(cli: &Cli, store: &mut Store, args: &EnterArgs) -> Result<()> {
    if args.values.is_empty() {
        bail_usage!(format!("no values given for {}", args.family));
    }
    let mut cells = Vec::with_capacity(args.values.len() + 1);
    cells.push(args.date.as_deref().map(parse_cell).unwrap_or_default());
    cells.extend(parse_values(&args.values));

    let clock = SystemClock;
    let (at, outcome) = with_document_lock(cli, store, |store| {
        let mut engine = store.engine(&clock);
        let at = engine.stage(args.family, cells.clone())?;
        tracing::debug!(family = %args.family, cell = %at, "entered values");
        let outcome = if args.submit { Some(engine.submit(args.family)?) } else { None };
        Ok((at, outcome))
    })?;
    if let Some(outcome) = outcome {
        return print_outcome(cli, &outcome);
    }

    output_by_format_result!(cli.format,
        json => print_json_status(
            "staged",
            None,
            &[
                ("family", json!(args.family)),
                ("cell", json!(at.to_string())),
                ("values", cells_json(&cells)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("Staged {} at {}", args.family.label(), at);
            }
        }
    )
}
