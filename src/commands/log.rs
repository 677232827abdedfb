//! `healthgrid log` - a family's event log, newest first

use serde_json::{json, Value};

use crate::cli::Cli;
use crate::commands::format::{cell_json, output_by_format_result};
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;
use healthgrid_core::submit::Family;

pub fn execute(cli: &Cli, store: &mut Store, family: Family, limit: Option<usize>) -> Result<()> {
    let clock = SystemClock;
    let mut entries = store.engine(&clock).log_entries(family)?;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    output_by_format_result!(cli.format,
        json => {
            let entries: Vec<Value> = entries
                .iter()
                .map(|e| {
                    json!({
                        "timestamp": cell_json(&e.timestamp),
                        "label": e.label,
                        "quantity": e.quantity.as_ref().map(cell_json),
                    })
                })
                .collect();
            let output = json!({ "family": family, "entries": entries });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if entries.is_empty() && !cli.quiet {
                println!("No {} log entries", family.label());
            }
            for e in &entries {
                match &e.quantity {
                    Some(q) => println!("{}  {}  {}", e.timestamp, e.label, q),
                    None => println!("{}  {}", e.timestamp, e.label),
                }
            }
        }
    )
}
