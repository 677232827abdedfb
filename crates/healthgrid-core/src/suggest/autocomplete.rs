//! Hidden helper blocks that back the nutrition-name dropdowns
//!
//! Each editable name slot owns one fixed-size block of column A on the
//! helper sheet. Blocks are rewritten in full and padded with blanks so no
//! stale names survive a shorter list.

use std::time::Instant;

use tracing::debug;

use super::{browse, SuggestionRanker};
use crate::config::SuggestConfig;
use crate::error::{HealthError, Result};
use crate::grid::{Cell, CellRef, Range, Sheet, Workbook};
use crate::layout::InputLayout;
use crate::trace_time;

const HELPER_COL: usize = 1;

/// Slot block geometry plus the ranker that fills it
#[derive(Debug, Clone, Copy)]
pub struct AutocompleteBlocks {
    block_size: usize,
    block_spacing: usize,
    slots: usize,
    ranker: SuggestionRanker,
}

impl AutocompleteBlocks {
    pub fn new(config: &SuggestConfig) -> Self {
        AutocompleteBlocks {
            block_size: config.block_size,
            block_spacing: config.block_spacing,
            slots: config.slots,
            ranker: SuggestionRanker::new(config.limit),
        }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Helper range owned by `slot` (0-based)
    pub fn block_range(&self, slot: usize) -> Range {
        Range::new(slot * self.block_spacing + 1, HELPER_COL, self.block_size, 1)
    }

    /// Slot whose dropdown is bound to the given input cell
    pub fn slot_for_input(&self, inputs: &InputLayout, cell: CellRef) -> Option<usize> {
        if cell.col != inputs.nutrition_name_col() || cell.row < inputs.nutrition.row {
            return None;
        }
        let slot = cell.row - inputs.nutrition.row;
        (slot < self.bound_slots(inputs)).then_some(slot)
    }

    /// Clear the helper sheet, fill every block and bind each name input once
    pub fn setup(&self, wb: &mut dyn Workbook, inputs: &InputLayout, names: &[String]) -> Result<()> {
        wb.clear_sheet(Sheet::AutocompleteHelper)?;
        self.refresh_all(wb, names)?;

        let col = inputs.nutrition_name_col();
        for slot in 0..self.bound_slots(inputs) {
            let cell = CellRef::new(inputs.nutrition.row + slot, col);
            if wb.validation(Sheet::Inputs, cell)?.is_some() {
                continue;
            }
            wb.bind_validation(Sheet::Inputs, cell, self.block_range(slot))?;
            debug!(cell = %cell, slot, "bound autocomplete block");
        }
        Ok(())
    }

    /// Write the browse list into every slot block
    pub fn refresh_all(&self, wb: &mut dyn Workbook, names: &[String]) -> Result<()> {
        let start = Instant::now();
        let listing = browse(names);
        let block = self.padded(&listing);
        for slot in 0..self.slots {
            let range = self.block_range(slot);
            wb.write(Sheet::AutocompleteHelper, range.row, range.col, &block)?;
        }
        trace_time!(start, "refresh_all_blocks", names = listing.len());
        Ok(())
    }

    /// Rewrite one slot's block for the current query
    pub fn update_slot(
        &self,
        wb: &mut dyn Workbook,
        slot: usize,
        query: &str,
        names: &[String],
    ) -> Result<Vec<String>> {
        if slot >= self.slots {
            return Err(HealthError::invalid_value(
                "autocomplete slot",
                format!("{} (have {})", slot, self.slots),
            ));
        }
        let ranked = self.ranker.rank(query, names);
        let range = self.block_range(slot);
        wb.write(Sheet::AutocompleteHelper, range.row, range.col, &self.padded(&ranked))?;
        debug!(slot, query, matches = ranked.len(), "updated autocomplete slot");
        Ok(ranked.into_iter().take(self.block_size).collect())
    }

    /// Names currently listed in a slot's block
    pub fn read_slot(&self, wb: &dyn Workbook, slot: usize) -> Result<Vec<String>> {
        let range = self.block_range(slot);
        let column = wb.read_column(Sheet::AutocompleteHelper, range.col, range.row, range.last_row())?;
        Ok(column
            .into_iter()
            .take_while(|c| !c.is_blank())
            .map(|c| c.to_string())
            .collect())
    }

    fn bound_slots(&self, inputs: &InputLayout) -> usize {
        self.slots.min(inputs.nutrition.height)
    }

    fn padded(&self, names: &[String]) -> Vec<Vec<Cell>> {
        let mut block: Vec<Vec<Cell>> = names
            .iter()
            .take(self.block_size)
            .map(|n| vec![Cell::text(n.as_str())])
            .collect();
        block.resize(self.block_size, vec![Cell::Empty]);
        block
    }
}
