use tracing::instrument;

use super::{required_date, timestamp_cell, Engine, Family, SubmitOutcome};
use crate::aggregate::{upsert, TallyPolicy};
use crate::error::Result;
use crate::eventlog::{prepend, LogEntry};
use crate::grid::Cell;
use crate::tally::TallyInput;

impl Engine<'_> {
    /// Tally the day's skincare products and log each application
    #[instrument(skip(self))]
    pub fn submit_skincare(&mut self) -> Result<SubmitOutcome> {
        let inputs = &self.layout.inputs;
        let (record, names_range, preview_range) =
            (inputs.skincare, inputs.skincare_names, inputs.skincare_preview);
        let fields = self.read_record(record)?;
        let date_cell = &fields[0];
        if !date_cell.is_present() {
            return Ok(SubmitOutcome::skipped(Family::Skincare, "date is required"));
        }
        let date = required_date(date_cell, record.top_left())?;
        let timestamp = timestamp_cell(date_cell, record.top_left())?;

        let products = self.read_record(names_range)?;
        let delta: Vec<TallyInput> = fields[1..].iter().map(TallyInput::parse).collect();
        if delta.iter().all(|input| *input == TallyInput::Ignore) {
            return Ok(SubmitOutcome::skipped(Family::Skincare, "no slot has a value"));
        }

        let table = self.layout.skincare_table;
        let row = upsert(&mut *self.wb, &table, self.config.max_rows, date, &delta, &TallyPolicy)?;

        let entries: Vec<LogEntry> = delta
            .iter()
            .zip(&products)
            .filter(|(input, _)| input.yes_count() > 0)
            .map(|(_, product)| LogEntry::new(timestamp.clone(), product.to_string(), None))
            .collect();
        let log = self.layout.skincare_log;
        prepend(&mut *self.wb, &log, &entries)?;

        let mut preview = vec![Cell::Date(row.date)];
        preview.extend(row.values);
        self.write_preview(preview_range, &preview)?;
        self.finish(record)?;

        Ok(SubmitOutcome::Submitted {
            family: Family::Skincare,
            preview,
        })
    }
}
