//! On-disk store for healthgrid
//!
//! The store is a directory (default `.healthgrid/`) holding the config,
//! the SQLite workbook and the batch lock file.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::config::GridConfig;
use crate::error::{HealthError, Result};
use crate::grid::SqliteWorkbook;
use crate::layout::Layout;
use crate::lock::{wait_lock, FileLock};
use crate::submit::Engine;
use paths::{CONFIG_FILE, DATABASE_FILE, DEFAULT_STORE_DIR, LOCK_FILE};

/// Result of work run under the document lock
#[derive(Debug)]
pub struct Locked<T> {
    pub value: T,
    /// False when the lock stayed busy past the timeout and the work ran unlocked
    pub lock_acquired: bool,
}

/// An opened healthgrid store
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: GridConfig,
    layout: Layout,
    workbook: SqliteWorkbook,
}

impl Store {
    /// Discover a store by walking up from the given directory
    pub fn discover(start: &Path) -> Result<Self> {
        let store_path = paths::discover_store(start)?;
        Self::open(&store_path)
    }

    /// Open an existing store directory
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(HealthError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            GridConfig::load(&config_path)?
        } else {
            GridConfig::default()
        };

        let workbook = SqliteWorkbook::open(&path.join(DATABASE_FILE))?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            layout: Layout::default(),
            workbook,
        })
    }

    /// Create a new store under `project_root`
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Create a new store at an explicit directory
    pub fn init_at(store_root: &Path) -> Result<Self> {
        if store_root.join(CONFIG_FILE).exists() {
            return Err(HealthError::StoreExists {
                path: store_root.to_path_buf(),
            });
        }
        fs::create_dir_all(store_root)?;
        GridConfig::default().save(&store_root.join(CONFIG_FILE))?;
        tracing::info!(path = %store_root.display(), "initialized store");
        Self::open(store_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn workbook(&self) -> &SqliteWorkbook {
        &self.workbook
    }

    pub fn workbook_mut(&mut self) -> &mut SqliteWorkbook {
        &mut self.workbook
    }

    /// Batch lock file for this store
    pub fn lock(&self) -> FileLock {
        FileLock::new(self.root.join(LOCK_FILE))
    }

    /// Run `work` while holding the document lock.
    ///
    /// Waiting is bounded by the `[lock]` settings; after a timeout the
    /// work still runs, unlocked.
    pub fn with_lock<T>(&mut self, work: impl FnOnce(&mut Store) -> Result<T>) -> Result<Locked<T>> {
        let lock = self.lock();
        let guard = wait_lock(&lock, self.config.lock.timeout(), self.config.lock.poll_interval())?;
        let lock_acquired = guard.acquired();
        let value = work(self)?;
        drop(guard);
        Ok(Locked { value, lock_acquired })
    }

    /// Orchestrators over this store's workbook
    pub fn engine<'a>(&'a mut self, clock: &'a dyn Clock) -> Engine<'a> {
        Engine::new(&mut self.workbook, &self.layout, &self.config, clock)
    }
}

#[cfg(test)]
mod tests;
