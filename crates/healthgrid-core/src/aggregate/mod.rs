//! Date-keyed upsert engine
//!
//! A [`DailyTable`] has one row per calendar date for keyed families. Rows
//! are found by a linear scan of the materialized date column; the first
//! blank date cell is reused before the table is extended. Scans cover
//! `max_rows` or the sheet's last populated row, whichever is further.

mod policy;

pub use policy::{AppendPolicy, MergePolicy, SumPolicy, TallyPolicy};

use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::grid::{Cell, CellRef, Range, Workbook};
use crate::layout::{AppendSeries, DailyTable};
use crate::trace_time;

/// A stored daily row after an upsert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub row: usize,
    pub date: NaiveDate,
    pub values: Vec<Cell>,
    /// True when the row was allocated by this upsert
    #[serde(skip)]
    pub created: bool,
}

/// Index of the first blank cell, or `cells.len()` if none
pub fn first_blank_index(cells: &[Cell]) -> usize {
    cells.iter().position(Cell::is_blank).unwrap_or(cells.len())
}

/// Locate-or-create the row for `date` and fold `delta` into it
pub fn upsert<P: MergePolicy>(
    wb: &mut dyn Workbook,
    table: &DailyTable,
    max_rows: usize,
    date: NaiveDate,
    delta: &P::Delta,
    policy: &P,
) -> Result<DailyRow> {
    let start = Instant::now();
    let dates = date_column(wb, table, max_rows)?;

    let existing = if policy.keyed() {
        dates.iter().position(|c| c.as_date() == Some(date))
    } else {
        None
    };

    let (row, values, created) = match existing {
        Some(offset) => {
            let row = table.start_row + offset;
            let current = wb.read_row(table.sheet, row, table.payload_col(), table.width)?;
            (row, policy.merge(&current, delta), false)
        }
        None => {
            let row = table.start_row + first_blank_index(&dates);
            (row, policy.initial(delta), true)
        }
    };

    let mut cells = Vec::with_capacity(values.len() + 1);
    cells.push(Cell::Date(date));
    cells.extend(values.iter().cloned());
    wb.write(table.sheet, row, table.date_col, &[cells])?;

    debug!(sheet = %table.sheet, row, %date, created, "upserted daily row");
    trace_time!(start, "upsert", row = row);
    Ok(DailyRow {
        row,
        date,
        values,
        created,
    })
}

/// Row holding `date`, if any
pub fn find_row(wb: &dyn Workbook, table: &DailyTable, max_rows: usize, date: NaiveDate) -> Result<Option<DailyRow>> {
    let dates = date_column(wb, table, max_rows)?;
    let Some(offset) = dates.iter().position(|c| c.as_date() == Some(date)) else {
        return Ok(None);
    };
    let row = table.start_row + offset;
    let values = wb.read_row(table.sheet, row, table.payload_col(), table.width)?;
    Ok(Some(DailyRow {
        row,
        date,
        values,
        created: false,
    }))
}

/// Every dated row in storage order
pub fn rows(wb: &dyn Workbook, table: &DailyTable, max_rows: usize) -> Result<Vec<DailyRow>> {
    let end = wb.scan_end(table.sheet, max_rows)?;
    if end < table.start_row {
        return Ok(Vec::new());
    }
    let height = end - table.start_row + 1;
    let block = wb.read(
        table.sheet,
        Range::new(table.start_row, table.date_col, height, table.width + 1),
    )?;
    Ok(block
        .into_iter()
        .enumerate()
        .filter_map(|(offset, mut cells)| {
            let date = cells.first()?.as_date()?;
            let values = cells.split_off(1);
            Some(DailyRow {
                row: table.start_row + offset,
                date,
                values,
                created: false,
            })
        })
        .collect())
}

/// Write one value per series column at the first row blank in all of them.
/// Returns the row written.
pub fn append_row(wb: &mut dyn Workbook, series: &AppendSeries, max_rows: usize, values: &[Cell]) -> Result<usize> {
    let end = wb.scan_end(series.sheet, max_rows)?;
    let mut offset = 0;
    for &col in &series.cols {
        let column = wb.read_column(series.sheet, col, series.start_row, end)?;
        offset = offset.max(first_blank_index(&column));
    }
    let row = series.start_row + offset;
    for (&col, value) in series.cols.iter().zip(values) {
        wb.write_cell(series.sheet, CellRef::new(row, col), value.clone())?;
    }
    debug!(sheet = %series.sheet, row, "appended series row");
    Ok(row)
}

fn date_column(wb: &dyn Workbook, table: &DailyTable, max_rows: usize) -> Result<Vec<Cell>> {
    let end = wb.scan_end(table.sheet, max_rows)?;
    wb.read_column(table.sheet, table.date_col, table.start_row, end)
}

#[cfg(test)]
mod tests;
