//! `healthgrid show` - stored daily rows for a family

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::cli::Cli;
use crate::commands::format::{cells_json, cells_line, output_by_format_result};
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;
use healthgrid_core::submit::Family;

pub fn execute(cli: &Cli, store: &mut Store, family: Family, date: Option<NaiveDate>) -> Result<()> {
    let clock = SystemClock;
    let rows = store.engine(&clock).history(family, date)?;

    output_by_format_result!(cli.format,
        json => {
            let rows: Vec<Value> = rows
                .iter()
                .map(|r| {
                    json!({
                        "row": r.row,
                        "date": r.date.format("%Y-%m-%d").to_string(),
                        "values": cells_json(&r.values),
                    })
                })
                .collect();
            let output = json!({ "family": family, "rows": rows });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if rows.is_empty() && !cli.quiet {
                println!("No {} rows", family.label());
            }
            for r in &rows {
                println!("{}  {}", r.date.format("%Y-%m-%d"), cells_line(&r.values));
            }
        }
    )
}
