//! Staging values into the input area and reacting to direct edits

use tracing::debug;

use super::{Engine, Family};
use crate::error::{HealthError, Result};
use crate::grid::{Cell, CellRef, Range, Sheet};
use crate::text::sort_key;

impl Engine<'_> {
    /// Input record range for a family; nutrition returns the whole block
    pub fn record_range(&self, family: Family) -> Range {
        let inputs = &self.layout.inputs;
        match family {
            Family::Weight => inputs.weight,
            Family::BodyFat => inputs.body_fat,
            Family::Nutrition => inputs.nutrition,
            Family::Water => inputs.water,
            Family::Supplements => inputs.supplements,
            Family::Skincare => inputs.skincare,
            Family::Stimulant => inputs.stimulant,
        }
    }

    /// Write `values` into a family's input record, left to right.
    /// Nutrition values go to the first row without a name.
    pub fn stage(&mut self, family: Family, values: Vec<Cell>) -> Result<CellRef> {
        let range = self.record_range(family);
        if values.len() > range.width {
            return Err(HealthError::invalid_value(
                &format!("{} input", family),
                format!("{} values (at most {})", values.len(), range.width),
            ));
        }
        let row = match family {
            Family::Nutrition => self.free_nutrition_row()?,
            _ => range.row,
        };
        let mut cells = values;
        if cells.first().is_some_and(Cell::is_blank) {
            // keep the autofilled date
            cells[0] = self.wb.read_cell(Sheet::Inputs, CellRef::new(row, range.col))?;
        }
        self.wb.write(Sheet::Inputs, row, range.col, &[cells])?;
        self.ensure_dates_present()?;
        debug!(family = %family, row, "staged input");
        Ok(CellRef::new(row, range.col))
    }

    fn free_nutrition_row(&self) -> Result<usize> {
        let range = self.layout.inputs.nutrition;
        let names = self.wb.read_column(
            Sheet::Inputs,
            self.layout.inputs.nutrition_name_col(),
            range.row,
            range.last_row(),
        )?;
        names
            .iter()
            .position(Cell::is_blank)
            .map(|offset| range.row + offset)
            .ok_or_else(|| HealthError::UsageError("all nutrition input rows are in use".to_string()))
    }

    /// Set the slot header names for supplements or skincare
    pub fn set_slot_names(&mut self, family: Family, names: &[String]) -> Result<()> {
        let range = match family {
            Family::Supplements => self.layout.inputs.supplement_names,
            Family::Skincare => self.layout.inputs.skincare_names,
            other => {
                return Err(HealthError::invalid_value("slot family", other));
            }
        };
        if names.len() > range.width {
            return Err(HealthError::invalid_value(
                "slot names",
                format!("{} names (at most {})", names.len(), range.width),
            ));
        }
        let mut row: Vec<Cell> = names.iter().map(|n| Cell::text(n.trim())).collect();
        row.resize(range.width, Cell::Empty);
        self.wb.write(Sheet::Inputs, range.row, range.col, &[row])
    }

    /// Insert or replace a supplement's base dose. Returns the row written.
    pub fn set_dose(&mut self, name: &str, dose: Cell) -> Result<usize> {
        let table = self.layout.doses;
        let end = self.wb.scan_end(table.sheet, self.config.max_rows)?;
        let names = self.wb.read_column(table.sheet, table.name_col, table.start_row, end)?;
        let key = sort_key(name);
        let offset = names
            .iter()
            .position(|c| c.is_blank() || sort_key(&c.to_string()) == key)
            .unwrap_or(names.len());
        let row = table.start_row + offset;
        self.wb.write(
            table.sheet,
            row,
            table.name_col,
            &[vec![Cell::text(name.trim()), dose]],
        )?;
        Ok(row)
    }

    /// React to a direct edit of `range` on `sheet`.
    ///
    /// Catalog edits resort both catalogs and refresh the helper blocks;
    /// nutrition table edits mirror the top edited row into the preview;
    /// input sheet edits refill blank dates and, for a single name cell,
    /// re-rank that slot's suggestions against `typed`.
    pub fn handle_edit(&mut self, sheet: Sheet, range: Range, typed: Option<&str>) -> Result<()> {
        match sheet {
            Sheet::Reference => {
                let touches = |col: usize, start_row: usize| {
                    range.last_row() >= start_row && range.col <= col && range.last_col() >= col
                };
                let (food, drink) = (self.layout.food_catalog, self.layout.drink_catalog);
                if touches(food.name_col, food.start_row) || touches(drink.name_col, drink.start_row) {
                    let (catalog, blocks) = (self.catalog(), self.autocomplete());
                    catalog.reconcile(&mut *self.wb, &blocks)?;
                }
            }
            Sheet::DataTables => {
                let table = self.layout.nutrition_table;
                let intersects = range.last_row() >= table.start_row
                    && range.last_col() >= table.date_col
                    && range.col <= table.date_col + table.width;
                if intersects {
                    self.mirror_nutrition_preview(range.row.max(table.start_row))?;
                }
            }
            Sheet::Inputs => {
                self.ensure_dates_present()?;
                let blocks = self.autocomplete();
                let slot = (range.height == 1 && range.width == 1)
                    .then(|| blocks.slot_for_input(&self.layout.inputs, range.top_left()))
                    .flatten();
                if let Some(slot) = slot {
                    let names = self.catalog().names(&*self.wb)?;
                    blocks.update_slot(&mut *self.wb, slot, typed.unwrap_or(""), &names)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
