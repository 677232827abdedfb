use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use super::{required_date, timestamp_cell, Engine, Family, SubmitOutcome};
use crate::aggregate::{find_row, upsert, SumPolicy};
use crate::catalog::{EntryKind, ReferenceEntry};
use crate::error::Result;
use crate::eventlog::{prepend, LogEntry};
use crate::grid::{Cell, CellRef, Range, Sheet};
use crate::layout::NUTRIENT_COUNT;

/// Fields of one nutrition input row
struct NutritionRow<'r> {
    date: &'r Cell,
    name: &'r Cell,
    kind: &'r Cell,
    measure: &'r Cell,
    servings: f64,
    raw: Vec<f64>,
}

impl<'r> NutritionRow<'r> {
    fn parse(cells: &'r [Cell]) -> Self {
        let raw = (0..NUTRIENT_COUNT)
            .map(|i| cells.get(5 + i).map(Cell::as_number).unwrap_or(0.0))
            .collect();
        NutritionRow {
            date: &cells[0],
            name: &cells[1],
            kind: &cells[2],
            measure: &cells[3],
            servings: cells[4].to_number().filter(|n| *n != 0.0).unwrap_or(1.0),
            raw,
        }
    }
}

impl Engine<'_> {
    /// Process every filled nutrition input row and clear the rows consumed.
    /// Rows with an unreadable date stay staged for correction.
    #[instrument(skip(self))]
    pub fn submit_nutrition(&mut self) -> Result<SubmitOutcome> {
        let record = self.layout.inputs.nutrition;
        let block = self.wb.read(Sheet::Inputs, record)?;

        let mut consumed = Vec::new();
        let mut last_date = None;
        for (offset, cells) in block.iter().enumerate() {
            let row = NutritionRow::parse(cells);
            let input_row = record.row + offset;
            if !row.date.is_present() || !row.name.is_present() {
                debug!(row = input_row, "nutrition row incomplete");
                continue;
            }
            let date_at = CellRef::new(input_row, record.col);
            let stamp = required_date(row.date, date_at)
                .and_then(|date| timestamp_cell(row.date, date_at).map(|ts| (date, ts)));
            let (date, timestamp) = match stamp {
                Ok(stamp) => stamp,
                Err(e) => {
                    warn!(row = input_row, error = %e, "nutrition row left staged");
                    continue;
                }
            };
            if self.submit_nutrition_row(&row, date, timestamp)? {
                last_date = Some(date);
            }
            self.wb.clear(Sheet::Inputs, Range::new(input_row, record.col, 1, record.width))?;
            consumed.push(input_row);
        }

        if consumed.is_empty() {
            return Ok(SubmitOutcome::skipped(Family::Nutrition, "no row has a readable date and a name"));
        }

        let preview = match last_date {
            Some(date) => self.mirror_nutrition_date(date)?,
            None => Vec::new(),
        };
        self.ensure_dates_present()?;
        Ok(SubmitOutcome::Submitted {
            family: Family::Nutrition,
            preview,
        })
    }

    /// Log one row and fold it into the day's totals. Returns false when
    /// the row had no entry type and only the log was written.
    fn submit_nutrition_row(&mut self, row: &NutritionRow<'_>, date: NaiveDate, timestamp: Cell) -> Result<bool> {
        let name = row.name.to_string();
        let log = self.layout.nutrition_log;
        prepend(
            &mut *self.wb,
            &log,
            &[LogEntry::new(timestamp, name.as_str(), Some(Cell::Number(row.servings)))],
        )?;

        if row.kind.is_blank() {
            return Ok(false);
        }
        let kind = row.kind.to_string().parse::<EntryKind>().ok();
        if kind.is_none() {
            warn!(kind = %row.kind, name = %name, "unknown entry type, using entered values");
        }

        let per_serving = match kind {
            Some(kind) => self.resolve_nutrients(kind, &name, row)?,
            None => row.raw.clone(),
        };
        let delta: Vec<f64> = per_serving.iter().map(|v| v * row.servings).collect();

        let table = self.layout.nutrition_table;
        upsert(&mut *self.wb, &table, self.config.max_rows, date, &delta, &SumPolicy)?;
        Ok(true)
    }

    /// Per-serving nutrients from the catalog, growing it on a miss
    fn resolve_nutrients(&mut self, kind: EntryKind, name: &str, row: &NutritionRow<'_>) -> Result<Vec<f64>> {
        let catalog = self.catalog();
        if let Some(entry) = catalog.lookup(&*self.wb, kind, name)? {
            return Ok(entry.attributes);
        }
        let entry = ReferenceEntry::new(name.trim(), row.measure.clone(), row.raw.clone());
        let autocomplete = self.autocomplete();
        catalog.grow(&mut *self.wb, kind, &entry, &autocomplete)?;
        Ok(row.raw.clone())
    }

    /// Mirror the nutrition row for `date` into the preview
    fn mirror_nutrition_date(&mut self, date: NaiveDate) -> Result<Vec<Cell>> {
        let table = self.layout.nutrition_table;
        match find_row(&*self.wb, &table, self.config.max_rows, date)? {
            Some(row) => self.mirror_nutrition_preview(row.row),
            None => {
                self.clear_nutrition_preview()?;
                Ok(Vec::new())
            }
        }
    }

    pub(super) fn clear_nutrition_preview(&mut self) -> Result<()> {
        let inputs = &self.layout.inputs;
        let (date_cell, totals) = (inputs.nutrition_preview_date, inputs.nutrition_preview_totals);
        self.wb.clear(Sheet::Inputs, Range::cell(date_cell))?;
        self.wb.clear(Sheet::Inputs, totals)
    }
}
