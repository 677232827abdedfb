//! Sheet names and rectangular addressing (1-based rows and columns)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};

/// The named sheets of a healthgrid workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sheet {
    Inputs,
    DataTables,
    TimeTables,
    Reference,
    Supplements,
    AutocompleteHelper,
    Cardio,
}

impl Sheet {
    pub const ALL: [Sheet; 7] = [
        Sheet::Inputs,
        Sheet::DataTables,
        Sheet::TimeTables,
        Sheet::Reference,
        Sheet::Supplements,
        Sheet::AutocompleteHelper,
        Sheet::Cardio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Inputs => "Inputs",
            Sheet::DataTables => "Data Tables",
            Sheet::TimeTables => "Time Tables",
            Sheet::Reference => "Food Nutrition Reference",
            Sheet::Supplements => "Supplements",
            Sheet::AutocompleteHelper => "_AutocompleteHelper",
            Sheet::Cardio => "Cardio Data",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sheet {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        Sheet::ALL
            .into_iter()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HealthError::not_found("sheet", s))
    }
}

/// A single cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        CellRef { row, col }
    }

    /// Parse an A1-style reference such as `AF4`
    pub fn a1(text: &str) -> Result<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| HealthError::invalid_value("cell reference", text))?;
        let (letters, digits) = text.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HealthError::invalid_value("cell reference", text));
        }

        let col = letters
            .chars()
            .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1));
        let row: usize = digits
            .parse()
            .map_err(|_| HealthError::invalid_value("cell reference", text))?;
        if row == 0 {
            return Err(HealthError::invalid_value("cell reference", text));
        }

        Ok(CellRef { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// Column number to spreadsheet letters (1 → A, 27 → AA)
pub fn column_letters(mut col: usize) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A rectangular block address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

impl Range {
    pub const fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Range {
            row,
            col,
            height,
            width,
        }
    }

    pub const fn cell(cell: CellRef) -> Self {
        Range::new(cell.row, cell.col, 1, 1)
    }

    /// Parse `B4` or `AI4:AQ4`
    pub fn a1(text: &str) -> Result<Self> {
        match text.split_once(':') {
            None => CellRef::a1(text).map(Range::cell),
            Some((start, end)) => {
                let start = CellRef::a1(start)?;
                let end = CellRef::a1(end)?;
                if end.row < start.row || end.col < start.col {
                    return Err(HealthError::invalid_value("range", text));
                }
                Ok(Range::new(
                    start.row,
                    start.col,
                    end.row - start.row + 1,
                    end.col - start.col + 1,
                ))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    pub fn last_row(&self) -> usize {
        self.row + self.height.saturating_sub(1)
    }

    pub fn last_col(&self) -> usize {
        self.col + self.width.saturating_sub(1)
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        !self.is_empty()
            && (self.row..=self.last_row()).contains(&cell.row)
            && (self.col..=self.last_col()).contains(&cell.col)
    }

    pub fn top_left(&self) -> CellRef {
        CellRef::new(self.row, self.col)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.height == 1 && self.width == 1 {
            write!(f, "{}", self.top_left())
        } else {
            write!(
                f,
                "{}:{}",
                self.top_left(),
                CellRef::new(self.last_row(), self.last_col())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a1_single_cells() {
        assert_eq!(CellRef::a1("B4").unwrap(), CellRef::new(4, 2));
        assert_eq!(CellRef::a1("AF8").unwrap(), CellRef::new(8, 32));
        assert_eq!(CellRef::a1("az8").unwrap(), CellRef::new(8, 52));
    }

    #[test]
    fn test_a1_rejects_garbage() {
        assert!(CellRef::a1("44").is_err());
        assert!(CellRef::a1("B0").is_err());
        assert!(CellRef::a1("B").is_err());
        assert!(Range::a1("C4:B4").is_err());
    }

    #[test]
    fn test_a1_ranges() {
        assert_eq!(Range::a1("I4:AD13").unwrap(), Range::new(4, 9, 10, 22));
        assert_eq!(Range::a1("AI8:AQ8").unwrap(), Range::new(8, 35, 1, 9));
        assert_eq!(Range::a1("I17").unwrap(), Range::new(17, 9, 1, 1));
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["B4", "AF4:AG4", "N17:AD17", "AX4:AZ1000"] {
            assert_eq!(Range::a1(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
    }

    #[test]
    fn test_sheet_from_str() {
        assert_eq!("data tables".parse::<Sheet>().unwrap(), Sheet::DataTables);
        assert!("Nope".parse::<Sheet>().is_err());
    }

    #[test]
    fn test_contains() {
        let range = Range::a1("J4:J13").unwrap();
        assert!(range.contains(CellRef::new(4, 10)));
        assert!(range.contains(CellRef::new(13, 10)));
        assert!(!range.contains(CellRef::new(14, 10)));
        assert!(!range.contains(CellRef::new(4, 9)));
    }
}
