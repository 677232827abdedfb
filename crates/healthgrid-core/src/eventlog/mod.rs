//! Reverse-chronological event logs
//!
//! A log block is kept contiguous from its start row. Every `prepend`
//! rereads the block, merges the new entries in and rewrites it sorted
//! newest first.

use std::cmp::Reverse;
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::grid::{row_is_blank, Cell, Range, Workbook};
use crate::layout::LogBlock;
use crate::trace_time;

/// One logged event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: Cell,
    pub label: String,
    pub quantity: Option<Cell>,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<Cell>, label: impl Into<String>, quantity: Option<Cell>) -> Self {
        LogEntry {
            timestamp: timestamp.into(),
            label: label.into(),
            quantity,
        }
    }

    /// Comparable form of the timestamp; unparseable values sort oldest
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_datetime()
    }

    fn to_row(&self, width: usize) -> Vec<Cell> {
        let mut row = vec![self.timestamp.clone(), Cell::text(self.label.as_str())];
        if let Some(quantity) = &self.quantity {
            row.push(quantity.clone());
        }
        row.resize(width, Cell::Empty);
        row
    }

    fn from_row(row: &[Cell]) -> Self {
        LogEntry {
            timestamp: row.first().cloned().unwrap_or_default(),
            label: row.get(1).map(|c| c.to_string()).unwrap_or_default(),
            quantity: row.get(2).filter(|c| !c.is_blank()).cloned(),
        }
    }
}

/// Merge `entries` into the log and rewrite it newest first
pub fn prepend(wb: &mut dyn Workbook, log: &LogBlock, entries: &[LogEntry]) -> Result<usize> {
    if entries.is_empty() {
        return Ok(0);
    }
    let start = Instant::now();

    let previous = block_range(wb, log)?;
    let mut rows: Vec<Vec<Cell>> = if previous.is_empty() {
        Vec::new()
    } else {
        wb.read(log.sheet, previous)?
            .into_iter()
            .filter(|row| !row_is_blank(row))
            .collect()
    };
    rows.extend(entries.iter().map(|e| e.to_row(log.width)));

    // Stable sort: equal timestamps keep existing-then-new insertion order
    rows.sort_by_key(|row| Reverse(row[0].as_datetime()));

    wb.write(log.sheet, log.start_row, log.start_col, &rows)?;
    if rows.len() < previous.height {
        let leftover = Range::new(
            log.start_row + rows.len(),
            log.start_col,
            previous.height - rows.len(),
            log.width,
        );
        wb.clear(log.sheet, leftover)?;
    }

    debug!(sheet = %log.sheet, col = log.start_col, added = entries.len(), total = rows.len(), "prepended log entries");
    trace_time!(start, "prepend_log", total = rows.len());
    Ok(rows.len())
}

/// Current log contents, newest first
pub fn entries(wb: &dyn Workbook, log: &LogBlock) -> Result<Vec<LogEntry>> {
    let range = block_range(wb, log)?;
    if range.is_empty() {
        return Ok(Vec::new());
    }
    Ok(wb
        .read(log.sheet, range)?
        .iter()
        .filter(|row| !row_is_blank(row))
        .map(|row| LogEntry::from_row(row))
        .collect())
}

fn block_range(wb: &dyn Workbook, log: &LogBlock) -> Result<Range> {
    let last = wb.last_row(log.sheet)?;
    let height = (last + 1).saturating_sub(log.start_row);
    Ok(Range::new(log.start_row, log.start_col, height, log.width))
}
