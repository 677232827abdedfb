//! Self-maintaining reference catalogs for foods and drinks
//!
//! Each catalog is a block of `[name, measure, attributes...]` rows. Lookups
//! compare normalized names; a miss means the caller should grow the catalog.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{HealthError, Result};
use crate::grid::{Cell, Range, Workbook};
use crate::layout::{CatalogBlock, Layout, NUTRIENT_COUNT};
use crate::suggest::AutocompleteBlocks;
use crate::text::{normalize, sort_key};
use crate::trace_time;

/// Which catalog an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Food,
    Drink,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Food, EntryKind::Drink];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Food => "Food",
            EntryKind::Drink => "Drink",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(EntryKind::Food),
            "drink" => Ok(EntryKind::Drink),
            other => Err(HealthError::invalid_value("entry type", other)),
        }
    }
}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub measure: Cell,
    pub attributes: Vec<f64>,
}

impl ReferenceEntry {
    pub fn new(name: impl Into<String>, measure: Cell, attributes: Vec<f64>) -> Self {
        ReferenceEntry {
            name: name.into(),
            measure,
            attributes,
        }
    }

    fn from_row(row: &[Cell]) -> Self {
        let mut attributes: Vec<f64> = row.iter().skip(2).map(Cell::as_number).collect();
        attributes.resize(NUTRIENT_COUNT, 0.0);
        ReferenceEntry {
            name: row.first().map(|c| c.to_string()).unwrap_or_default(),
            measure: row.get(1).cloned().unwrap_or_default(),
            attributes,
        }
    }

    fn to_row(&self) -> Vec<Cell> {
        let mut row = Vec::with_capacity(CatalogBlock::WIDTH);
        row.push(Cell::text(self.name.as_str()));
        row.push(self.measure.clone());
        row.extend(self.attributes.iter().map(|v| Cell::Number(*v)));
        row.resize(CatalogBlock::WIDTH, Cell::Number(0.0));
        row
    }
}

/// Food and drink catalogs over a workbook
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCatalog {
    food: CatalogBlock,
    drink: CatalogBlock,
    max_rows: usize,
}

impl ReferenceCatalog {
    pub fn new(layout: &Layout, max_rows: usize) -> Self {
        ReferenceCatalog {
            food: layout.food_catalog,
            drink: layout.drink_catalog,
            max_rows,
        }
    }

    pub fn block(&self, kind: EntryKind) -> CatalogBlock {
        match kind {
            EntryKind::Food => self.food,
            EntryKind::Drink => self.drink,
        }
    }

    /// First entry whose normalized name equals the normalized query
    pub fn lookup(&self, wb: &dyn Workbook, kind: EntryKind, name: &str) -> Result<Option<ReferenceEntry>> {
        let key = normalize(name);
        if key.is_empty() {
            return Ok(None);
        }
        let block = self.block(kind);
        let names = self.name_column(wb, block)?;
        let Some(index) = names.iter().position(|c| normalize(&c.to_string()) == key) else {
            debug!(kind = %kind, name, "catalog lookup miss");
            return Ok(None);
        };
        let row = wb.read_row(
            block.sheet,
            block.start_row + index,
            block.name_col,
            CatalogBlock::WIDTH,
        )?;
        Ok(Some(ReferenceEntry::from_row(&row)))
    }

    /// Write `entry` into the first empty slot, extending the block if full.
    /// Returns the row written.
    pub fn append(&self, wb: &mut dyn Workbook, kind: EntryKind, entry: &ReferenceEntry) -> Result<usize> {
        let block = self.block(kind);
        let names = self.name_column(wb, block)?;
        let offset = names
            .iter()
            .position(Cell::is_blank)
            .unwrap_or(names.len());
        let row = block.start_row + offset;
        wb.write(block.sheet, row, block.name_col, &[entry.to_row()])?;
        debug!(kind = %kind, name = %entry.name, row, "appended catalog entry");
        Ok(row)
    }

    /// Drop empty rows, sort by case-insensitive name and rewrite compacted
    pub fn resort(&self, wb: &mut dyn Workbook, kind: EntryKind) -> Result<usize> {
        let start = Instant::now();
        let block = self.block(kind);
        let range = self.occupied(wb, block)?;
        if range.is_empty() {
            return Ok(0);
        }

        let mut rows: Vec<Vec<Cell>> = wb
            .read(block.sheet, range)?
            .into_iter()
            .filter(|row| row.first().is_some_and(|name| !name.is_blank()))
            .collect();
        rows.sort_by_cached_key(|row| sort_key(&row[0].to_string()));

        wb.clear(block.sheet, range)?;
        if !rows.is_empty() {
            wb.write(block.sheet, block.start_row, block.name_col, &rows)?;
        }
        trace_time!(start, "resort_catalog", entries = rows.len());
        Ok(rows.len())
    }

    /// Entries in storage order, skipping empty rows
    pub fn entries(&self, wb: &dyn Workbook, kind: EntryKind) -> Result<Vec<ReferenceEntry>> {
        let block = self.block(kind);
        let range = self.occupied(wb, block)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        Ok(wb
            .read(block.sheet, range)?
            .iter()
            .filter(|row| !row[0].is_blank())
            .map(|row| ReferenceEntry::from_row(row))
            .collect())
    }

    /// Candidate set for suggestions: food then drink names, trimmed,
    /// nonblank, first occurrence kept
    pub fn names(&self, wb: &dyn Workbook) -> Result<Vec<String>> {
        let mut seen = std::collections::HashSet::new();
        let mut names = Vec::new();
        for kind in EntryKind::ALL {
            for cell in self.name_column(wb, self.block(kind))? {
                let name = cell.to_string().trim().to_string();
                if !name.is_empty() && seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Record an ad-hoc entry: append, resort, then rebuild the browse lists
    pub fn grow(
        &self,
        wb: &mut dyn Workbook,
        kind: EntryKind,
        entry: &ReferenceEntry,
        autocomplete: &AutocompleteBlocks,
    ) -> Result<()> {
        self.append(wb, kind, entry)?;
        self.resort(wb, kind)?;
        let names = self.names(wb)?;
        autocomplete.refresh_all(wb, &names)?;
        info!(kind = %kind, name = %entry.name, "catalog grew");
        Ok(())
    }

    /// Resort both catalogs and refresh every helper block
    pub fn reconcile(&self, wb: &mut dyn Workbook, autocomplete: &AutocompleteBlocks) -> Result<()> {
        for kind in EntryKind::ALL {
            self.resort(wb, kind)?;
        }
        let names = self.names(wb)?;
        autocomplete.refresh_all(wb, &names)
    }

    fn name_column(&self, wb: &dyn Workbook, block: CatalogBlock) -> Result<Vec<Cell>> {
        let end = wb.scan_end(block.sheet, self.max_rows)?;
        wb.read_column(block.sheet, block.name_col, block.start_row, end)
    }

    /// Block rows from the start row through the sheet's last populated row
    fn occupied(&self, wb: &dyn Workbook, block: CatalogBlock) -> Result<Range> {
        let last = wb.scan_end(block.sheet, self.max_rows)?;
        let height = (last + 1).saturating_sub(block.start_row);
        Ok(Range::new(block.start_row, block.name_col, height, CatalogBlock::WIDTH))
    }
}

#[cfg(test)]
mod tests;
