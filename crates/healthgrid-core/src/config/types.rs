//! Configuration type definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Last sheet row included when materializing a column for scans
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Suggestion ranking and autocomplete helper layout
    #[serde(default)]
    pub suggest: SuggestConfig,

    /// Document lock behavior for batch submissions
    #[serde(default)]
    pub lock: LockConfig,

    /// Activity import settings
    #[serde(default)]
    pub activity: ActivityConfig,
}

/// Configuration for the suggestion ranker and its helper blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Maximum suggestions returned in search mode
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,

    /// Rows per autocomplete helper block
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Row distance between the starts of consecutive helper blocks
    #[serde(default = "default_block_spacing")]
    pub block_spacing: usize,

    /// Number of concurrently editable name slots
    #[serde(default = "default_slots")]
    pub slots: usize,
}

/// Configuration for the cooperative document lock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Seconds to wait for the lock before proceeding unlocked
    #[serde(default = "default_lock_timeout_secs")]
    pub timeout_secs: u64,

    /// Milliseconds between acquisition attempts
    #[serde(default = "default_lock_poll_millis")]
    pub poll_millis: u64,
}

/// Configuration for the activity importer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Buckets dated before this day are ignored
    #[serde(default = "default_activity_start")]
    pub start_date: NaiveDate,

    /// Largest date window requested from a source at once
    #[serde(default = "default_chunk_days")]
    pub chunk_days: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            version: STORE_FORMAT_VERSION,
            max_rows: default_max_rows(),
            suggest: SuggestConfig::default(),
            lock: LockConfig::default(),
            activity: ActivityConfig::default(),
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            limit: default_suggest_limit(),
            block_size: default_block_size(),
            block_spacing: default_block_spacing(),
            slots: default_slots(),
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        LockConfig {
            timeout_secs: default_lock_timeout_secs(),
            poll_millis: default_lock_poll_millis(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        ActivityConfig {
            start_date: default_activity_start(),
            chunk_days: default_chunk_days(),
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_max_rows() -> usize {
    1000
}

fn default_suggest_limit() -> usize {
    300
}

fn default_block_size() -> usize {
    1000
}

fn default_block_spacing() -> usize {
    1200
}

fn default_slots() -> usize {
    10
}

fn default_lock_timeout_secs() -> u64 {
    30
}

fn default_lock_poll_millis() -> u64 {
    100
}

fn default_activity_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn default_chunk_days() -> u32 {
    90
}
