use tracing::instrument;

use super::{malformed_input, Engine, Family, SubmitOutcome};
use crate::aggregate::{upsert, AppendPolicy};
use crate::error::Result;
use crate::grid::Cell;

impl Engine<'_> {
    /// Record a stimulant dose event. Every submission gets its own row,
    /// even when the day already has one.
    #[instrument(skip(self))]
    pub fn submit_stimulant(&mut self) -> Result<SubmitOutcome> {
        let (record, preview_range) = (self.layout.inputs.stimulant, self.layout.inputs.stimulant_preview);
        let fields = self.read_record(record)?;
        let (when_cell, taken) = (&fields[0], &fields[1]);
        if !when_cell.is_present() || !taken.is_present() {
            return Ok(SubmitOutcome::skipped(Family::Stimulant, "time and yes/no are required"));
        }
        let when = when_cell
            .as_datetime()
            .ok_or_else(|| malformed_input(record.top_left(), when_cell, "a timestamp"))?;

        let event = vec![taken.clone(), Cell::Time(when.time())];
        let table = self.layout.stimulant_table;
        upsert(&mut *self.wb, &table, self.config.max_rows, when.date(), &event, &AppendPolicy)?;

        let preview = vec![Cell::DateTime(when), taken.clone()];
        self.write_preview(preview_range, &preview)?;
        self.finish(record)?;

        Ok(SubmitOutcome::Submitted {
            family: Family::Stimulant,
            preview,
        })
    }
}
