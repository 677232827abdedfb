use tracing::instrument;

use super::{Engine, Family, SubmitOutcome};
use crate::aggregate::append_row;
use crate::error::Result;
use crate::grid::{Cell, Range};

impl Engine<'_> {
    /// Append a `[date, weight]` reading
    #[instrument(skip(self))]
    pub fn submit_weight(&mut self) -> Result<SubmitOutcome> {
        let (record, preview) = (self.layout.inputs.weight, self.layout.inputs.weight_preview);
        let fields = self.read_record(record)?;
        if !fields.iter().all(Cell::is_present) {
            return Ok(SubmitOutcome::skipped(Family::Weight, "date and weight are required"));
        }
        self.append_series(Family::Weight, record, preview, fields)
    }

    /// Append a body-fat reading; all three fields are required
    #[instrument(skip(self))]
    pub fn submit_body_fat(&mut self) -> Result<SubmitOutcome> {
        let (record, preview) = (self.layout.inputs.body_fat, self.layout.inputs.body_fat_preview);
        let fields = self.read_record(record)?;
        if !fields.iter().all(Cell::is_present) {
            return Ok(SubmitOutcome::skipped(Family::BodyFat, "all three values are required"));
        }
        self.append_series(Family::BodyFat, record, preview, fields)
    }

    fn append_series(
        &mut self,
        family: Family,
        record: Range,
        preview: Range,
        fields: Vec<Cell>,
    ) -> Result<SubmitOutcome> {
        let series = match family {
            Family::BodyFat => &self.layout.body_fat_series,
            _ => &self.layout.weight_series,
        };
        append_row(&mut *self.wb, series, self.config.max_rows, &fields)?;
        self.write_preview(preview, &fields)?;
        self.finish(record)?;
        Ok(SubmitOutcome::Submitted {
            family,
            preview: fields,
        })
    }
}
