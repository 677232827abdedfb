//! Cell values stored in the workbook

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// A single workbook cell.
///
/// Dates and times are local wall-clock values; the store has no timezone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

/// A rectangular block of cells, row-major
pub type Block = Vec<Vec<Cell>>;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for empty cells and empty strings
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True when the cell holds a value that counts as "filled in" for a
    /// required input field. Zero and whitespace-only text do not count.
    pub fn is_present(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(s) => !s.trim().is_empty(),
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            _ => true,
        }
    }

    /// Numeric coercion: numbers as-is, numeric text parsed, everything else 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Numeric value if the cell holds a number or numeric text
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Timestamp view of the cell; dates become midnight
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::DateTime(dt) => Some(*dt),
            Cell::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Cell::Text(s) => parse_datetime(s.trim()),
            _ => None,
        }
    }

    /// Calendar-date view of the cell with any time of day stripped
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_datetime().map(|dt| dt.date())
    }

    /// Time-of-day view of the cell
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Cell::Time(t) => Some(*t),
            Cell::DateTime(dt) => Some(dt.time()),
            Cell::Text(s) => TIME_FORMATS
                .iter()
                .find_map(|f| NaiveTime::parse_from_str(s.trim(), f).ok()),
            _ => None,
        }
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parse user-supplied text into the most specific cell kind
pub fn parse_cell(input: &str) -> Cell {
    let s = input.trim();
    if s.is_empty() {
        return Cell::Empty;
    }
    if let Ok(n) = s.parse::<f64>() {
        if n.is_finite() {
            return Cell::Number(n);
        }
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Cell::Date(d);
    }
    if let Some(dt) = parse_datetime(s) {
        return Cell::DateTime(dt);
    }
    Cell::Text(input.to_string())
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", format_number(*n)),
            Cell::Date(d) => write!(f, "{}", d.format("%-m/%-d/%Y")),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%-m/%-d/%Y %-H:%M")),
            Cell::Time(t) => write!(f, "{}", t.format("%-H:%M")),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(dt: NaiveDateTime) -> Self {
        Cell::DateTime(dt)
    }
}

impl From<NaiveTime> for Cell {
    fn from(t: NaiveTime) -> Self {
        Cell::Time(t)
    }
}

/// True when every cell in the row is blank
pub fn row_is_blank(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_and_present() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::text("").is_blank());
        assert!(!Cell::text(" ").is_blank());
        assert!(!Cell::text(" ").is_present());
        assert!(!Cell::Number(0.0).is_present());
        assert!(!Cell::Number(0.0).is_blank());
        assert!(Cell::Number(2.5).is_present());
    }

    #[test]
    fn test_as_number_is_lenient() {
        assert_eq!(Cell::Number(3.5).as_number(), 3.5);
        assert_eq!(Cell::text(" 12 ").as_number(), 12.0);
        assert_eq!(Cell::text("abc").as_number(), 0.0);
        assert_eq!(Cell::Empty.as_number(), 0.0);
        assert_eq!(Cell::Date(date(2025, 1, 1)).as_number(), 0.0);
    }

    #[test]
    fn test_as_date_strips_time() {
        let dt = date(2025, 3, 9).and_hms_opt(21, 15, 0).unwrap();
        assert_eq!(Cell::DateTime(dt).as_date(), Some(date(2025, 3, 9)));
        assert_eq!(Cell::text("3/9/2025").as_date(), Some(date(2025, 3, 9)));
        assert_eq!(Cell::text("2025-03-09 08:00").as_date(), Some(date(2025, 3, 9)));
        assert_eq!(Cell::text("not a date").as_date(), None);
        assert_eq!(Cell::Empty.as_date(), None);
    }

    #[test]
    fn test_parse_cell_kinds() {
        assert_eq!(parse_cell("500"), Cell::Number(500.0));
        assert_eq!(parse_cell("2025-01-02"), Cell::Date(date(2025, 1, 2)));
        assert_eq!(
            parse_cell("2025-01-02 07:30"),
            Cell::DateTime(date(2025, 1, 2).and_hms_opt(7, 30, 0).unwrap())
        );
        assert_eq!(parse_cell("Yes x2"), Cell::text("Yes x2"));
        assert_eq!(parse_cell("   "), Cell::Empty);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(Cell::Number(800.0).to_string(), "800");
        assert_eq!(Cell::Number(1.25).to_string(), "1.25");
        assert_eq!(Cell::Date(date(2025, 7, 4)).to_string(), "7/4/2025");
        assert_eq!(
            Cell::DateTime(date(2025, 7, 4).and_hms_opt(9, 5, 0).unwrap()).to_string(),
            "7/4/2025 9:05"
        );
    }

    #[test]
    fn test_row_is_blank() {
        assert!(row_is_blank(&[Cell::Empty, Cell::text("")]));
        assert!(!row_is_blank(&[Cell::Empty, Cell::Number(0.0)]));
    }
}
