//! Store configuration for healthgrid
//!
//! Configuration is stored in `.healthgrid/config.toml`. Every key is optional.

pub mod types;

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{HealthError, Result};

pub use types::{ActivityConfig, GridConfig, LockConfig, SuggestConfig, STORE_FORMAT_VERSION};

impl GridConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GridConfig = toml::from_str(&content)?;

        if config.version > STORE_FORMAT_VERSION {
            tracing::warn!(
                version = config.version,
                supported = STORE_FORMAT_VERSION,
                "store format is newer than this binary"
            );
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HealthError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl LockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_millis.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.version, STORE_FORMAT_VERSION);
        assert_eq!(config.max_rows, 1000);
        assert_eq!(config.suggest.limit, 300);
        assert_eq!(config.suggest.block_size, 1000);
        assert_eq!(config.suggest.block_spacing, 1200);
        assert_eq!(config.suggest.slots, 10);
        assert_eq!(config.lock.timeout_secs, 30);
        assert_eq!(config.activity.chunk_days, 90);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = GridConfig {
            max_rows: 250,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = GridConfig::load(&path).unwrap();
        assert_eq!(loaded.max_rows, 250);
        assert_eq!(loaded.suggest.limit, 300);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[suggest]\nlimit = 25\n\n[activity]\nstart_date = \"2024-06-01\"\n",
        )
        .unwrap();

        let loaded = GridConfig::load(&path).unwrap();
        assert_eq!(loaded.suggest.limit, 25);
        assert_eq!(loaded.suggest.slots, 10);
        assert_eq!(
            loaded.activity.start_date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(loaded.max_rows, 1000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_rows = \"lots\"").unwrap();

        assert!(matches!(
            GridConfig::load(&path),
            Err(HealthError::Toml(_))
        ));
    }

    #[test]
    fn test_lock_durations() {
        let lock = LockConfig {
            timeout_secs: 2,
            poll_millis: 0,
        };
        assert_eq!(lock.timeout(), Duration::from_secs(2));
        assert_eq!(lock.poll_interval(), Duration::from_millis(1));
    }
}
