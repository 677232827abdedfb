//! Store directory names and discovery

use std::path::{Path, PathBuf};

use crate::error::{HealthError, Result};

/// Default store directory name
pub const DEFAULT_STORE_DIR: &str = ".healthgrid";

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "healthgrid.db";
pub const LOCK_FILE: &str = "healthgrid.lock";

/// Walk up from `start` until a directory containing the store is found
pub fn discover_store(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(DEFAULT_STORE_DIR);
        if candidate.is_dir() {
            tracing::debug!(path = %candidate.display(), "discovered store");
            return Ok(candidate);
        }
        current = dir.parent();
    }
    Err(HealthError::StoreNotFound {
        search_root: start.to_path_buf(),
    })
}
