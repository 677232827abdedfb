//! Daily activity import
//!
//! Sources hand back pre-aggregated daily buckets. The importer only asks
//! for bounded date windows and lays the result out as a month grid.

mod grid;

pub use grid::{write_activity_grid, GridSummary, KM_TO_MI};

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HealthError, Result};

/// One day of aggregated activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    #[serde(default)]
    pub steps: u64,
    /// Distance covered, in meters
    #[serde(default)]
    pub meters: f64,
}

/// Provider of daily activity buckets
pub trait ActivitySource {
    /// Buckets for `start <= date < end`
    fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyActivity>>;
}

/// Fetch `start..=end` from `source` in windows of at most `chunk_days`
pub fn fetch_range(
    source: &dyn ActivitySource,
    start: NaiveDate,
    end: NaiveDate,
    chunk_days: u32,
) -> Result<Vec<DailyActivity>> {
    if chunk_days == 0 {
        return Err(HealthError::invalid_value("activity chunk_days", chunk_days));
    }
    let end_exclusive = end + Duration::days(1);
    let mut out = Vec::new();
    let mut cursor = start;
    while cursor < end_exclusive {
        let window_end = (cursor + Duration::days(i64::from(chunk_days))).min(end_exclusive);
        let mut batch = source.fetch(cursor, window_end)?;
        debug!(%cursor, %window_end, buckets = batch.len(), "fetched activity window");
        out.append(&mut batch);
        cursor = window_end;
    }
    Ok(out)
}

/// Activity buckets exported to a JSON array file
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    days: Vec<DailyActivity>,
}

impl JsonFileSource {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let days: Vec<DailyActivity> = serde_json::from_str(&content)?;
        Ok(JsonFileSource { days })
    }
}

impl ActivitySource for JsonFileSource {
    fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyActivity>> {
        Ok(self
            .days
            .iter()
            .filter(|d| d.date >= start && d.date < end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    struct RecordingSource {
        windows: RefCell<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl ActivitySource for RecordingSource {
        fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyActivity>> {
            self.windows.borrow_mut().push((start, end));
            Ok(vec![DailyActivity {
                date: start,
                steps: 1,
                meters: 0.0,
            }])
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fetch_range_chunks_windows() {
        let source = RecordingSource {
            windows: RefCell::new(Vec::new()),
        };
        let days = fetch_range(&source, ymd(2025, 1, 1), ymd(2025, 1, 10), 4).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(
            *source.windows.borrow(),
            vec![
                (ymd(2025, 1, 1), ymd(2025, 1, 5)),
                (ymd(2025, 1, 5), ymd(2025, 1, 9)),
                (ymd(2025, 1, 9), ymd(2025, 1, 11)),
            ]
        );
    }

    #[test]
    fn test_fetch_range_rejects_zero_chunk() {
        let source = JsonFileSource::default();
        assert!(fetch_range(&source, ymd(2025, 1, 1), ymd(2025, 1, 2), 0).is_err());
    }

    #[test]
    fn test_json_source_filters_window() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("activity.json");
        fs::write(
            &path,
            r#"[{"date":"2025-02-01","steps":4000,"meters":3200.5},{"date":"2025-02-03","steps":10}]"#,
        )
        .unwrap();
        let source = JsonFileSource::load(&path).unwrap();
        let days = source.fetch(ymd(2025, 2, 2), ymd(2025, 2, 4)).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].steps, 10);
        assert_eq!(days[0].meters, 0.0);
    }
}
