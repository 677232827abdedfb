use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use super::{required_date, timestamp_cell, Engine, Family, SubmitOutcome};
use crate::aggregate::{upsert, SumPolicy, TallyPolicy};
use crate::error::Result;
use crate::eventlog::{prepend, LogEntry};
use crate::grid::{Cell, Workbook};
use crate::layout::{DoseTable, NUTRIENT_COUNT, VITAMIN_D_INDEX};
use crate::tally::{is_vitamin_d3, multiply_dose, TallyInput};

/// Dose per supplement name, keyed by trimmed lowercase name.
/// Reading stops at the first blank name.
pub fn dose_lookup(wb: &dyn Workbook, table: &DoseTable, max_rows: usize) -> Result<HashMap<String, Cell>> {
    let end = wb.scan_end(table.sheet, max_rows)?;
    let names = wb.read_column(table.sheet, table.name_col, table.start_row, end)?;
    let count = names.iter().take_while(|c| !c.is_blank()).count();
    let doses = wb.read_column(
        table.sheet,
        table.name_col + 1,
        table.start_row,
        table.start_row + count,
    )?;
    Ok(names
        .iter()
        .take(count)
        .zip(doses)
        .map(|(name, dose)| (name.to_string().trim().to_lowercase(), dose))
        .collect())
}

impl Engine<'_> {
    /// Tally the day's supplement slots and log every dose taken
    #[instrument(skip(self))]
    pub fn submit_supplements(&mut self) -> Result<SubmitOutcome> {
        let inputs = &self.layout.inputs;
        let (record, names_range, preview_range) =
            (inputs.supplements, inputs.supplement_names, inputs.supplement_preview);
        let fields = self.read_record(record)?;
        let date_cell = &fields[0];
        if !date_cell.is_present() {
            return Ok(SubmitOutcome::skipped(Family::Supplements, "date is required"));
        }
        let date = required_date(date_cell, record.top_left())?;
        let timestamp = timestamp_cell(date_cell, record.top_left())?;

        let names = self.read_record(names_range)?;
        let delta: Vec<TallyInput> = fields[1..].iter().map(TallyInput::parse).collect();
        if delta.iter().all(|input| *input == TallyInput::Ignore) {
            return Ok(SubmitOutcome::skipped(Family::Supplements, "no slot has a value"));
        }

        let table = self.layout.supplement_table;
        let row = upsert(&mut *self.wb, &table, self.config.max_rows, date, &delta, &TallyPolicy)?;

        let doses = dose_lookup(&*self.wb, &self.layout.doses, self.config.max_rows)?;
        let mut entries = Vec::new();
        let mut vitamin_d: u32 = 0;
        for (input, name) in delta.iter().zip(&names) {
            let TallyInput::Yes(count) = *input else {
                continue;
            };
            let label = name.to_string();
            let dose = doses
                .get(&label.trim().to_lowercase())
                .map(|base| multiply_dose(base, count))
                .filter(|d| !d.is_blank());
            entries.push(LogEntry::new(timestamp.clone(), label.as_str(), dose));
            if is_vitamin_d3(&label) {
                vitamin_d = vitamin_d.saturating_add(count);
            }
        }
        let log = self.layout.supplement_log;
        prepend(&mut *self.wb, &log, &entries)?;

        if vitamin_d > 0 {
            self.bump_vitamin_d(date, vitamin_d)?;
        }

        let mut preview = vec![Cell::Date(row.date)];
        preview.extend(row.values);
        self.write_preview(preview_range, &preview)?;
        self.finish(record)?;

        Ok(SubmitOutcome::Submitted {
            family: Family::Supplements,
            preview,
        })
    }

    /// Add one unit of vitamin D per vitamin D3 dose to the day's nutrition row
    fn bump_vitamin_d(&mut self, date: NaiveDate, count: u32) -> Result<()> {
        let mut delta = vec![0.0; NUTRIENT_COUNT];
        delta[VITAMIN_D_INDEX] = f64::from(count);
        let table = self.layout.nutrition_table;
        let row = upsert(&mut *self.wb, &table, self.config.max_rows, date, &delta, &SumPolicy)?;
        debug!(%date, count, row = row.row, "vitamin D3 added to nutrition totals");
        self.mirror_nutrition_preview(row.row)?;
        Ok(())
    }
}
