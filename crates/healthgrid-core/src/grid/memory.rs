//! In-memory workbook

use std::collections::{BTreeMap, HashMap};

use super::{Block, Cell, CellRef, Range, Sheet, Workbook};
use crate::error::Result;

/// Workbook held entirely in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryWorkbook {
    sheets: HashMap<Sheet, BTreeMap<(usize, usize), Cell>>,
    validations: HashMap<(Sheet, CellRef), Range>,
}

impl MemoryWorkbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-blank cells on a sheet
    #[must_use]
    pub fn cell_count(&self, sheet: Sheet) -> usize {
        self.sheets.get(&sheet).map_or(0, BTreeMap::len)
    }
}

impl Workbook for MemoryWorkbook {
    fn read(&self, sheet: Sheet, range: Range) -> Result<Block> {
        let cells = self.sheets.get(&sheet);
        Ok((0..range.height)
            .map(|r| {
                (0..range.width)
                    .map(|c| {
                        cells
                            .and_then(|m| m.get(&(range.row + r, range.col + c)))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect())
    }

    fn write(&mut self, sheet: Sheet, row: usize, col: usize, block: &[Vec<Cell>]) -> Result<()> {
        let cells = self.sheets.entry(sheet).or_default();
        for (r, values) in block.iter().enumerate() {
            for (c, value) in values.iter().enumerate() {
                let key = (row + r, col + c);
                if value.is_blank() {
                    cells.remove(&key);
                } else {
                    cells.insert(key, value.clone());
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, sheet: Sheet, range: Range) -> Result<()> {
        if let Some(cells) = self.sheets.get_mut(&sheet) {
            cells.retain(|&(row, col), _| !range.contains(CellRef::new(row, col)));
        }
        Ok(())
    }

    fn clear_sheet(&mut self, sheet: Sheet) -> Result<()> {
        self.sheets.remove(&sheet);
        Ok(())
    }

    fn last_row(&self, sheet: Sheet) -> Result<usize> {
        Ok(self
            .sheets
            .get(&sheet)
            .and_then(|cells| cells.keys().map(|&(row, _)| row).max())
            .unwrap_or(0))
    }

    fn bind_validation(&mut self, sheet: Sheet, cell: CellRef, source: Range) -> Result<()> {
        self.validations.insert((sheet, cell), source);
        Ok(())
    }

    fn validation(&self, sheet: Sheet, cell: CellRef) -> Result<Option<Range>> {
        Ok(self.validations.get(&(sheet, cell)).copied())
    }
}
