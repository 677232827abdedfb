//! Submission orchestrators
//!
//! Each family reads its input record from the input sheet and, when the
//! required fields are filled in, resolves names, upserts the day's row,
//! logs sub-events, writes a preview and clears the record.

mod batch;
mod body;
mod history;
mod inputs;
mod names;
mod nutrition;
mod preview;
mod skincare;
mod stimulant;
mod supplements;
mod water;

pub use batch::{BatchReport, FamilyResult, FamilyStatus};
pub use supplements::dose_lookup;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceCatalog;
use crate::clock::Clock;
use crate::config::GridConfig;
use crate::error::{HealthError, Result};
use crate::grid::{Cell, CellRef, Range, Sheet, Workbook};
use crate::layout::Layout;
use crate::suggest::AutocompleteBlocks;

/// Metric families, in batch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Weight,
    BodyFat,
    Nutrition,
    Water,
    Supplements,
    Skincare,
    Stimulant,
}

impl Family {
    pub const ALL: [Family; 7] = [
        Family::Weight,
        Family::BodyFat,
        Family::Nutrition,
        Family::Water,
        Family::Supplements,
        Family::Skincare,
        Family::Stimulant,
    ];

    /// Human label used in batch reports
    pub fn label(&self) -> &'static str {
        match self {
            Family::Weight => "Weight",
            Family::BodyFat => "Body Fat",
            Family::Nutrition => "Nutrition",
            Family::Water => "Water",
            Family::Supplements => "Supplements",
            Family::Skincare => "Skincare",
            Family::Stimulant => "Stimulant",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Weight => "weight",
            Family::BodyFat => "body-fat",
            Family::Nutrition => "nutrition",
            Family::Water => "water",
            Family::Supplements => "supplements",
            Family::Skincare => "skincare",
            Family::Stimulant => "stimulant",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "weight" => Ok(Family::Weight),
            "body-fat" | "bodyfat" => Ok(Family::BodyFat),
            "nutrition" | "food" => Ok(Family::Nutrition),
            "water" => Ok(Family::Water),
            "supplements" | "supplement" => Ok(Family::Supplements),
            "skincare" => Ok(Family::Skincare),
            "stimulant" => Ok(Family::Stimulant),
            _ => Err(HealthError::invalid_value("family", s)),
        }
    }
}

/// Result of one orchestrator run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// Data was written; `preview` mirrors the preview block
    Submitted { family: Family, preview: Vec<Cell> },
    /// Required fields were missing; nothing was written for the record
    Skipped { family: Family, reason: String },
}

impl SubmitOutcome {
    pub fn family(&self) -> Family {
        match self {
            SubmitOutcome::Submitted { family, .. } | SubmitOutcome::Skipped { family, .. } => *family,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }

    fn skipped(family: Family, reason: &str) -> Self {
        tracing::info!(family = %family, reason, "skipped submission");
        SubmitOutcome::Skipped {
            family,
            reason: reason.to_string(),
        }
    }
}

/// Orchestrators over one workbook
pub struct Engine<'a> {
    wb: &'a mut dyn Workbook,
    layout: &'a Layout,
    config: &'a GridConfig,
    clock: &'a dyn Clock,
}

impl<'a> Engine<'a> {
    pub fn new(
        wb: &'a mut dyn Workbook,
        layout: &'a Layout,
        config: &'a GridConfig,
        clock: &'a dyn Clock,
    ) -> Self {
        Engine {
            wb,
            layout,
            config,
            clock,
        }
    }

    pub fn workbook(&self) -> &dyn Workbook {
        &*self.wb
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    pub fn catalog(&self) -> ReferenceCatalog {
        ReferenceCatalog::new(self.layout, self.config.max_rows)
    }

    pub fn autocomplete(&self) -> AutocompleteBlocks {
        AutocompleteBlocks::new(&self.config.suggest)
    }

    /// Run one family's orchestrator
    pub fn submit(&mut self, family: Family) -> Result<SubmitOutcome> {
        match family {
            Family::Weight => self.submit_weight(),
            Family::BodyFat => self.submit_body_fat(),
            Family::Nutrition => self.submit_nutrition(),
            Family::Water => self.submit_water(),
            Family::Supplements => self.submit_supplements(),
            Family::Skincare => self.submit_skincare(),
            Family::Stimulant => self.submit_stimulant(),
        }
    }

    /// Read a single-row input record
    fn read_record(&self, range: Range) -> Result<Vec<Cell>> {
        self.wb.read_row(Sheet::Inputs, range.row, range.col, range.width)
    }

    fn write_preview(&mut self, range: Range, values: &[Cell]) -> Result<()> {
        let mut row: Vec<Cell> = values.iter().take(range.width).cloned().collect();
        row.resize(range.width, Cell::Empty);
        self.wb.write(Sheet::Inputs, range.row, range.col, &[row])
    }

    /// Clear a consumed input record and refill blank date cells
    fn finish(&mut self, record: Range) -> Result<()> {
        self.wb.clear(Sheet::Inputs, record)?;
        self.ensure_dates_present()
    }
}

/// Staged input cell at `at` that cannot be read as `expected`
fn malformed_input(at: CellRef, cell: &Cell, expected: &str) -> HealthError {
    HealthError::malformed_cell(
        Sheet::Inputs.name(),
        at.row,
        at.col,
        format!("{} is not {}", cell, expected),
    )
}

/// Calendar date of the required date cell staged at `at`
fn required_date(cell: &Cell, at: CellRef) -> Result<NaiveDate> {
    cell.as_date().ok_or_else(|| malformed_input(at, cell, "a date"))
}

/// Date or timestamp cell suitable for an event log entry
fn timestamp_cell(cell: &Cell, at: CellRef) -> Result<Cell> {
    match cell {
        Cell::Date(_) | Cell::DateTime(_) => Ok(cell.clone()),
        other => other
            .as_datetime()
            .map(Cell::DateTime)
            .ok_or_else(|| malformed_input(at, other, "a timestamp")),
    }
}

#[cfg(test)]
pub(crate) mod testing;
