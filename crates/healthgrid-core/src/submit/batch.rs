//! Locked multi-family submission

use serde::Serialize;
use tracing::{info, warn};

use super::{Engine, Family, SubmitOutcome};
use crate::error::Result;
use crate::lock::{wait_lock, DocumentLock};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum FamilyStatus {
    Ok { outcome: SubmitOutcome },
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyResult {
    pub family: Family,
    #[serde(flatten)]
    pub status: FamilyStatus,
}

impl FamilyResult {
    /// `"Label: OK"` or `"Label: <error>"`
    pub fn summary(&self) -> String {
        match &self.status {
            FamilyStatus::Ok { .. } => format!("{}: OK", self.family.label()),
            FamilyStatus::Failed { message } => format!("{}: {}", self.family.label(), message),
        }
    }
}

/// Per-family outcome of a batch submission
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub lock_acquired: bool,
    pub results: Vec<FamilyResult>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, FamilyStatus::Failed { .. }))
            .count()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        self.results.iter().map(FamilyResult::summary).collect()
    }
}

impl Engine<'_> {
    /// Submit every family in order under the document lock.
    ///
    /// A lock timeout does not stop the batch, and one family's failure
    /// does not stop the others.
    pub fn submit_all(&mut self, lock: &dyn DocumentLock) -> Result<BatchReport> {
        let settings = &self.config.lock;
        let guard = wait_lock(lock, settings.timeout(), settings.poll_interval())?;
        let lock_acquired = guard.acquired();

        let mut results = Vec::with_capacity(Family::ALL.len());
        for family in Family::ALL {
            let status = match self.submit(family) {
                Ok(outcome) => FamilyStatus::Ok { outcome },
                Err(e) => {
                    warn!(family = %family, error = %e, "submission failed");
                    FamilyStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };
            results.push(FamilyResult { family, status });
        }
        drop(guard);

        let report = BatchReport {
            lock_acquired,
            results,
        };
        info!(failures = report.failures(), lock_acquired, "batch submission finished");
        Ok(report)
    }
}
