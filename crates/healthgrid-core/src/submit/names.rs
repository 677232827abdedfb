//! Catalog maintenance and autocomplete through the engine

use tracing::info;

use super::Engine;
use crate::catalog::{EntryKind, ReferenceEntry};
use crate::error::{HealthError, Result};
use crate::grid::{Range, Sheet};

impl Engine<'_> {
    /// Rebuild every helper block and bind the nutrition name inputs.
    /// Returns the number of candidate names.
    pub fn setup_autocomplete(&mut self) -> Result<usize> {
        let names = self.catalog().names(&*self.wb)?;
        let blocks = self.autocomplete();
        blocks.setup(&mut *self.wb, &self.layout.inputs, &names)?;
        info!(names = names.len(), slots = blocks.slots(), "autocomplete ready");
        Ok(names.len())
    }

    /// Re-rank one slot's helper block for `query` and return its list
    pub fn suggest_for_slot(&mut self, slot: usize, query: &str) -> Result<Vec<String>> {
        let names = self.catalog().names(&*self.wb)?;
        self.autocomplete()
            .update_slot(&mut *self.wb, slot, query, &names)
    }

    /// Add a catalog entry unless the name is already known
    pub fn add_catalog_entry(&mut self, kind: EntryKind, entry: &ReferenceEntry) -> Result<()> {
        if entry.name.trim().is_empty() {
            return Err(HealthError::invalid_value("catalog name", "(blank)"));
        }
        let (catalog, blocks) = (self.catalog(), self.autocomplete());
        if catalog.lookup(&*self.wb, kind, &entry.name)?.is_some() {
            return Err(HealthError::invalid_value(
                &format!("{} entry", kind),
                format!("{} already exists", entry.name),
            ));
        }
        catalog.grow(&mut *self.wb, kind, entry, &blocks)
    }

    /// Treat the catalog block as edited: resort both catalogs and refresh suggestions
    pub fn resort_catalogs(&mut self) -> Result<()> {
        let food = self.layout.food_catalog;
        let range = Range::new(food.start_row, food.name_col, self.config.max_rows, 1);
        self.handle_edit(Sheet::Reference, range, None)
    }
}
