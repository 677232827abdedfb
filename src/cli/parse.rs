use chrono::NaiveDate;

use healthgrid_core::catalog::EntryKind;
use healthgrid_core::grid::{parse_cell, Cell};
use healthgrid_core::submit::Family;

/// Parse a metric family from string
pub fn parse_family(s: &str) -> std::result::Result<Family, String> {
    s.parse::<Family>().map_err(|e| e.to_string())
}

/// Parse a catalog kind (food or drink)
pub fn parse_entry_kind(s: &str) -> std::result::Result<EntryKind, String> {
    s.parse::<EntryKind>().map_err(|e| e.to_string())
}

/// Parse a calendar date; accepts the same spellings as date cells
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    Cell::text(s)
        .as_date()
        .ok_or_else(|| format!("invalid date: {}", s))
}

/// Convert positional input values to cells
pub fn parse_values(values: &[String]) -> Vec<Cell> {
    values.iter().map(|v| parse_cell(v)).collect()
}
