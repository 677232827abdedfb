//! Read-back of stored family data

use chrono::NaiveDate;

use super::{Engine, Family};
use crate::aggregate::{rows, DailyRow};
use crate::error::{HealthError, Result};
use crate::eventlog::{entries, LogEntry};
use crate::grid::Cell;
use crate::layout::{AppendSeries, DailyTable, LogBlock};

impl Engine<'_> {
    /// Date-keyed table backing a family; body metrics have none
    pub fn daily_table(&self, family: Family) -> Option<DailyTable> {
        match family {
            Family::Nutrition => Some(self.layout.nutrition_table),
            Family::Water => Some(self.layout.water_table),
            Family::Supplements => Some(self.layout.supplement_table),
            Family::Skincare => Some(self.layout.skincare_table),
            Family::Stimulant => Some(self.layout.stimulant_table),
            Family::Weight | Family::BodyFat => None,
        }
    }

    /// Event log kept for a family, if it has one
    pub fn log_block(&self, family: Family) -> Option<LogBlock> {
        match family {
            Family::Nutrition => Some(self.layout.nutrition_log),
            Family::Supplements => Some(self.layout.supplement_log),
            Family::Skincare => Some(self.layout.skincare_log),
            _ => None,
        }
    }

    /// Stored rows for `family` in storage order, optionally for one date
    pub fn history(&self, family: Family, date: Option<NaiveDate>) -> Result<Vec<DailyRow>> {
        let stored = match self.daily_table(family) {
            Some(table) => rows(&*self.wb, &table, self.config.max_rows)?,
            None => {
                let series = match family {
                    Family::BodyFat => &self.layout.body_fat_series,
                    _ => &self.layout.weight_series,
                };
                self.series_rows(series)?
            }
        };
        Ok(stored
            .into_iter()
            .filter(|row| date.is_none_or(|d| row.date == d))
            .collect())
    }

    /// Logged events for `family`, newest first
    pub fn log_entries(&self, family: Family) -> Result<Vec<LogEntry>> {
        let block = self
            .log_block(family)
            .ok_or_else(|| HealthError::invalid_value("logged family", family))?;
        entries(&*self.wb, &block)
    }

    fn series_rows(&self, series: &AppendSeries) -> Result<Vec<DailyRow>> {
        let end = self.wb.scan_end(series.sheet, self.config.max_rows)?;
        let columns = series
            .cols
            .iter()
            .map(|&col| self.wb.read_column(series.sheet, col, series.start_row, end))
            .collect::<Result<Vec<_>>>()?;
        let height = columns.first().map_or(0, Vec::len);
        Ok((0..height)
            .filter_map(|offset| {
                let mut cells: Vec<Cell> = columns.iter().map(|c| c[offset].clone()).collect();
                let date = cells.first()?.as_date()?;
                let values = cells.split_off(1);
                Some(DailyRow {
                    row: series.start_row + offset,
                    date,
                    values,
                    created: false,
                })
            })
            .collect())
    }
}
