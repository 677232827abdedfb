//! `healthgrid import-activity` - lay daily activity buckets out as a month grid

use chrono::Local;
use serde_json::json;

use crate::cli::args::ImportActivityArgs;
use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::activity::{fetch_range, write_activity_grid, JsonFileSource};
use healthgrid_core::bail_invalid;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;

pub fn execute(cli: &Cli, store: &mut Store, args: &ImportActivityArgs) -> Result<()> {
    let settings = store.config().activity.clone();
    let start = args.start.unwrap_or(settings.start_date);
    let end = args.end.unwrap_or_else(|| Local::now().date_naive());
    if end < start {
        bail_invalid!("activity range", format!("{} is before {}", end, start));
    }

    let source = JsonFileSource::load(&args.file)?;
    let days = fetch_range(&source, start, end, settings.chunk_days)?;
    let summary = with_document_lock(cli, store, |store| {
        write_activity_grid(store.workbook_mut(), &days, settings.start_date)
    })?;
    tracing::info!(days = summary.days, years = summary.years.len(), "imported activity");

    output_by_format_result!(cli.format,
        json => print_json_status(
            "imported",
            None,
            &[("days", json!(summary.days)), ("years", json!(summary.years))],
        ),
        human => {
            if !cli.quiet {
                let years: Vec<String> = summary.years.iter().map(|y| y.to_string()).collect();
                println!("Imported {} days of activity ({})", summary.days, years.join(", "));
            }
        }
    )
}
