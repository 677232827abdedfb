//! CLI commands for healthgrid

pub mod autocomplete;
pub mod catalog;
pub mod dispatch;
pub mod enter;
pub mod format;
pub mod import_activity;
pub mod init;
pub mod log;
pub mod preview;
pub mod show;
pub mod slots;
pub mod submit;
pub mod suggest;

use healthgrid_core::error::Result;
use healthgrid_core::store::Store;

use crate::cli::Cli;

/// Run a workbook mutation under the document lock
pub fn with_document_lock<T>(
    cli: &Cli,
    store: &mut Store,
    work: impl FnOnce(&mut Store) -> Result<T>,
) -> Result<T> {
    let locked = store.with_lock(work)?;
    if !locked.lock_acquired && !cli.quiet {
        eprintln!("warning: document lock busy, proceeded without it");
    }
    Ok(locked.value)
}
