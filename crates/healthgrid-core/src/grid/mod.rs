//! Tabular store boundary
//!
//! All domain logic reads and writes rectangular blocks through the
//! [`Workbook`] trait. Rows and columns are 1-based, matching the
//! spreadsheet-style layout the data was designed around.

mod cell;
mod memory;
mod range;
mod sqlite;

pub use cell::{format_number, parse_cell, row_is_blank, Block, Cell};
pub use memory::MemoryWorkbook;
pub use range::{column_letters, CellRef, Range, Sheet};
pub use sqlite::SqliteWorkbook;

use crate::error::Result;

/// Rectangular block storage over named sheets
pub trait Workbook {
    /// Read a block; missing cells come back as [`Cell::Empty`].
    /// The result always has `range.height` rows of `range.width` cells.
    fn read(&self, sheet: Sheet, range: Range) -> Result<Block>;

    /// Write a block with its top-left corner at `(row, col)`.
    /// Writing [`Cell::Empty`] removes the stored value.
    fn write(&mut self, sheet: Sheet, row: usize, col: usize, block: &[Vec<Cell>]) -> Result<()>;

    /// Clear the content of a block, leaving everything else untouched
    fn clear(&mut self, sheet: Sheet, range: Range) -> Result<()>;

    /// Remove every value on a sheet
    fn clear_sheet(&mut self, sheet: Sheet) -> Result<()>;

    /// Last row holding a non-blank value anywhere on the sheet, 0 if none
    fn last_row(&self, sheet: Sheet) -> Result<usize>;

    /// Bind an input cell to the block of allowed suggestions
    fn bind_validation(&mut self, sheet: Sheet, cell: CellRef, source: Range) -> Result<()>;

    /// Validation source bound to a cell, if any
    fn validation(&self, sheet: Sheet, cell: CellRef) -> Result<Option<Range>>;

    fn read_cell(&self, sheet: Sheet, cell: CellRef) -> Result<Cell> {
        let block = self.read(sheet, Range::cell(cell))?;
        Ok(block
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_default())
    }

    fn write_cell(&mut self, sheet: Sheet, cell: CellRef, value: Cell) -> Result<()> {
        self.write(sheet, cell.row, cell.col, &[vec![value]])
    }

    /// Read one row of `width` cells starting at `(row, col)`
    fn read_row(&self, sheet: Sheet, row: usize, col: usize, width: usize) -> Result<Vec<Cell>> {
        let block = self.read(sheet, Range::new(row, col, 1, width))?;
        Ok(block.into_iter().next().unwrap_or_default())
    }

    /// Last row a key-column scan must cover: the configured window, or
    /// further when the sheet already holds rows below it
    fn scan_end(&self, sheet: Sheet, window: usize) -> Result<usize> {
        Ok(self.last_row(sheet)?.max(window))
    }

    /// Materialize column `col` from `first_row` through `last_row` inclusive
    fn read_column(
        &self,
        sheet: Sheet,
        col: usize,
        first_row: usize,
        last_row: usize,
    ) -> Result<Vec<Cell>> {
        if last_row < first_row {
            return Ok(Vec::new());
        }
        let block = self.read(sheet, Range::new(first_row, col, last_row - first_row + 1, 1))?;
        Ok(block
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect())
    }
}

/// Shared contract checks run against every workbook implementation
#[cfg(test)]
pub(crate) mod contract {
    use super::*;

    pub fn exercise(wb: &mut dyn Workbook) {
        assert_eq!(wb.last_row(Sheet::DataTables).unwrap(), 0);

        wb.write(
            Sheet::DataTables,
            4,
            2,
            &[
                vec![Cell::Number(1.0), Cell::text("a")],
                vec![Cell::Empty, Cell::text("b")],
            ],
        )
        .unwrap();

        let block = wb.read(Sheet::DataTables, Range::new(3, 1, 4, 3)).unwrap();
        assert_eq!(block.len(), 4);
        assert!(block.iter().all(|row| row.len() == 3));
        assert_eq!(block[1][1], Cell::Number(1.0));
        assert_eq!(block[1][2], Cell::text("a"));
        assert_eq!(block[2][1], Cell::Empty);
        assert_eq!(block[2][2], Cell::text("b"));
        assert_eq!(wb.last_row(Sheet::DataTables).unwrap(), 5);
        assert_eq!(wb.last_row(Sheet::Inputs).unwrap(), 0);

        wb.clear(Sheet::DataTables, Range::new(5, 1, 1, 5)).unwrap();
        assert_eq!(wb.last_row(Sheet::DataTables).unwrap(), 4);
        assert_eq!(
            wb.read_cell(Sheet::DataTables, CellRef::new(4, 3)).unwrap(),
            Cell::text("a")
        );

        let column = wb.read_column(Sheet::DataTables, 2, 4, 6).unwrap();
        assert_eq!(column, vec![Cell::Number(1.0), Cell::Empty, Cell::Empty]);

        let source = Range::new(1, 1, 1000, 1);
        wb.bind_validation(Sheet::Inputs, CellRef::new(4, 10), source)
            .unwrap();
        assert_eq!(
            wb.validation(Sheet::Inputs, CellRef::new(4, 10)).unwrap(),
            Some(source)
        );
        assert_eq!(wb.validation(Sheet::Inputs, CellRef::new(5, 10)).unwrap(), None);

        wb.clear_sheet(Sheet::DataTables).unwrap();
        assert_eq!(wb.last_row(Sheet::DataTables).unwrap(), 0);
    }
}
