//! Date autofill and preview maintenance on the input sheet

use chrono::NaiveTime;
use tracing::debug;

use super::Engine;
use crate::aggregate::{find_row, DailyRow};
use crate::error::Result;
use crate::grid::{Cell, Range, Sheet};
use crate::layout::DailyTable;

impl Engine<'_> {
    /// Fill every blank date input with today's date
    pub fn ensure_dates_present(&mut self) -> Result<()> {
        let today = Cell::Date(self.clock.today());
        for range in self.layout.inputs.date_cells.iter().copied() {
            let mut block = self.wb.read(Sheet::Inputs, range)?;
            let mut changed = false;
            for cell in block.iter_mut().flatten() {
                if cell.is_blank() {
                    *cell = today.clone();
                    changed = true;
                }
            }
            if changed {
                self.wb.write(Sheet::Inputs, range.row, range.col, &block)?;
            }
        }
        Ok(())
    }

    /// Reset every date input to today and clear all preview blocks
    pub fn reset_date_inputs(&mut self) -> Result<()> {
        for range in self.layout.inputs.date_cells.iter().copied() {
            self.wb.clear(Sheet::Inputs, range)?;
        }
        self.ensure_dates_present()?;
        for range in self.layout.inputs.previews() {
            self.wb.clear(Sheet::Inputs, range)?;
        }
        Ok(())
    }

    /// Mirror today's stored rows into the preview blocks, clearing any
    /// preview whose family has nothing for today
    pub fn refresh_today_previews(&mut self) -> Result<()> {
        let now = self.clock.now();
        let today = now.date();
        let inputs = self.layout.inputs.clone();

        match self.today_row(&self.layout.nutrition_table)? {
            Some(row) => {
                self.mirror_nutrition_preview(row.row)?;
            }
            None => self.clear_nutrition_preview()?,
        }

        let water = self
            .today_row(&self.layout.water_table)?
            .map(|row| vec![Cell::DateTime(now), row.values.into_iter().next().unwrap_or_default()]);
        self.set_or_clear(inputs.water_preview, water)?;

        for (table, preview) in [
            (self.layout.supplement_table, inputs.supplement_preview),
            (self.layout.skincare_table, inputs.skincare_preview),
        ] {
            let values = self.today_row(&table)?.map(|row| {
                let mut values = vec![Cell::Date(row.date)];
                values.extend(row.values);
                values
            });
            self.set_or_clear(preview, values)?;
        }

        let stimulant = self.today_row(&self.layout.stimulant_table)?.map(|row| {
            let time = row.values.get(1).and_then(Cell::as_time).unwrap_or(NaiveTime::MIN);
            let when = today.and_time(time);
            vec![Cell::DateTime(when), row.values.first().cloned().unwrap_or_default()]
        });
        self.set_or_clear(inputs.stimulant_preview, stimulant)?;

        debug!(%today, "refreshed previews");
        Ok(())
    }

    /// Copy a nutrition data row into the nutrition preview; a row with no
    /// date clears the preview instead
    pub fn mirror_nutrition_preview(&mut self, row: usize) -> Result<Vec<Cell>> {
        let table = self.layout.nutrition_table;
        let cells = self.wb.read_row(table.sheet, row, table.date_col, table.width + 1)?;
        let Some(date) = cells.first().and_then(Cell::as_date) else {
            self.clear_nutrition_preview()?;
            return Ok(Vec::new());
        };

        let inputs = &self.layout.inputs;
        let (date_cell, totals_range) = (inputs.nutrition_preview_date, inputs.nutrition_preview_totals);
        let totals: Vec<Cell> = cells[1..].to_vec();
        self.wb.write_cell(Sheet::Inputs, date_cell, Cell::Date(date))?;
        self.write_preview(totals_range, &totals)?;

        let mut preview = vec![Cell::Date(date)];
        preview.extend(totals);
        Ok(preview)
    }

    fn today_row(&self, table: &DailyTable) -> Result<Option<DailyRow>> {
        find_row(&*self.wb, table, self.config.max_rows, self.clock.today())
    }

    fn set_or_clear(&mut self, range: Range, values: Option<Vec<Cell>>) -> Result<()> {
        match values {
            Some(values) => self.write_preview(range, &values),
            None => self.wb.clear(Sheet::Inputs, range),
        }
    }
}
