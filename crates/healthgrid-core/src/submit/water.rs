use tracing::instrument;

use super::{malformed_input, required_date, Engine, Family, SubmitOutcome};
use crate::aggregate::{upsert, SumPolicy};
use crate::error::Result;
use crate::grid::{Cell, CellRef};

impl Engine<'_> {
    /// Add the entered amount to the day's water total
    #[instrument(skip(self))]
    pub fn submit_water(&mut self) -> Result<SubmitOutcome> {
        let inputs = &self.layout.inputs;
        let (record, preview_range) = (inputs.water, inputs.water_preview);
        let fields = self.read_record(record)?;
        let (date_cell, amount_cell) = (&fields[0], &fields[1]);
        if !date_cell.is_present() || !amount_cell.is_present() {
            return Ok(SubmitOutcome::skipped(Family::Water, "date and amount are required"));
        }

        let date = required_date(date_cell, record.top_left())?;
        let amount_at = CellRef::new(record.row, record.col + 1);
        let amount = amount_cell
            .to_number()
            .ok_or_else(|| malformed_input(amount_at, amount_cell, "a number"))?;

        let table = self.layout.water_table;
        let row = upsert(&mut *self.wb, &table, self.config.max_rows, date, &vec![amount], &SumPolicy)?;

        let stamp = row.date.and_time(self.clock.now().time());
        let total = row.values.first().cloned().unwrap_or_default();
        let preview = vec![Cell::DateTime(stamp), total];
        self.write_preview(preview_range, &preview)?;
        self.finish(record)?;

        Ok(SubmitOutcome::Submitted {
            family: Family::Water,
            preview,
        })
    }
}
