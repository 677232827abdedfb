//! `healthgrid init` - create a new store

use std::path::Path;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let mut store = match cli.store.as_ref() {
        Some(path) => Store::init_at(&resolve_store_path(root, path))?,
        None => Store::init(root)?,
    };

    let clock = SystemClock;
    with_document_lock(cli, &mut store, |store| {
        let mut engine = store.engine(&clock);
        engine.setup_autocomplete()?;
        engine.ensure_dates_present()
    })?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            Some("Store initialized"),
            &[("store", serde_json::json!(store.root().display().to_string()))],
        ),
        human => {
            if !cli.quiet {
                println!("Initialized healthgrid store at {}", store.root().display());
            }
        }
    )
}
