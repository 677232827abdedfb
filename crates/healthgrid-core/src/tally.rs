//! Tally status model for supplement and skincare slots
//!
//! Stored cells read `"Yes"`, `"Yes xN"`, `"No"`, `"N/A"` or blank.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::grid::{format_number, Cell};

static STORED_YES: OnceLock<Regex> = OnceLock::new();
static INPUT_YES: OnceLock<Regex> = OnceLock::new();
static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();
static UNIT: OnceLock<Regex> = OnceLock::new();
static VITAMIN_D3: OnceLock<Regex> = OnceLock::new();

fn stored_yes() -> &'static Regex {
    STORED_YES.get_or_init(|| Regex::new(r"^yes\s*x\s*(\d+)$").expect("valid regex"))
}

fn input_yes() -> &'static Regex {
    INPUT_YES.get_or_init(|| Regex::new(r"^y(?:es)?\s*x\s*(\d+)$").expect("valid regex"))
}

/// Stored status of one slot for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyStatus {
    Unset,
    No,
    NotApplicable,
    Yes(u32),
}

impl TallyStatus {
    pub fn from_cell(cell: &Cell) -> Self {
        let text = cell.to_string().trim().to_lowercase();
        match text.as_str() {
            "" => TallyStatus::Unset,
            "no" => TallyStatus::No,
            "n/a" => TallyStatus::NotApplicable,
            "yes" => TallyStatus::Yes(1),
            _ => match stored_yes()
                .captures(&text)
                .and_then(|c| c[1].parse::<u32>().ok())
            {
                Some(n) if n > 0 => TallyStatus::Yes(n),
                _ => TallyStatus::Unset,
            },
        }
    }

    /// Number of "Yes" doses already recorded; No and N/A count as zero
    pub fn yes_count(&self) -> u32 {
        match self {
            TallyStatus::Yes(n) => *n,
            _ => 0,
        }
    }

    pub fn to_cell(&self) -> Cell {
        match self {
            TallyStatus::Unset => Cell::Empty,
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for TallyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyStatus::Unset => Ok(()),
            TallyStatus::No => f.write_str("No"),
            TallyStatus::NotApplicable => f.write_str("N/A"),
            TallyStatus::Yes(1) => f.write_str("Yes"),
            TallyStatus::Yes(n) => write!(f, "Yes x{}", n),
        }
    }
}

/// One slot of a submitted status record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyInput {
    /// Blank or unrecognized: leave the stored value alone
    Ignore,
    No,
    NotApplicable,
    Yes(u32),
}

impl TallyInput {
    /// Parse `yes`, `y`, `yes x2`, `y x3`, a bare count like `2`, `no`, `n` or `n/a`
    pub fn parse(cell: &Cell) -> Self {
        let text = cell.to_string().trim().to_lowercase();
        match text.as_str() {
            "" => TallyInput::Ignore,
            "n/a" => TallyInput::NotApplicable,
            "no" | "n" => TallyInput::No,
            "yes" | "y" => TallyInput::Yes(1),
            _ => {
                if let Some(caps) = input_yes().captures(&text) {
                    let n = caps[1].parse::<u32>().unwrap_or(1);
                    return TallyInput::Yes(n.max(1));
                }
                match text.parse::<u32>() {
                    Ok(n) if n > 0 => TallyInput::Yes(n),
                    _ => TallyInput::Ignore,
                }
            }
        }
    }

    pub fn yes_count(&self) -> u32 {
        match self {
            TallyInput::Yes(n) => *n,
            _ => 0,
        }
    }

    /// Combine this input into a stored cell. Yes accumulates; No and N/A
    /// overwrite; Ignore keeps the stored cell byte for byte.
    pub fn apply(&self, existing: &Cell) -> Cell {
        match self {
            TallyInput::Ignore => existing.clone(),
            TallyInput::No => TallyStatus::No.to_cell(),
            TallyInput::NotApplicable => TallyStatus::NotApplicable.to_cell(),
            TallyInput::Yes(n) => {
                let total = TallyStatus::from_cell(existing).yes_count().saturating_add(*n);
                TallyStatus::Yes(total).to_cell()
            }
        }
    }
}

/// Scale a per-dose amount by a count, keeping units.
///
/// Numbers multiply directly; text such as `"5,000 mg"` becomes `"10000mg"`;
/// text without a leading number becomes `"<dose> xN"`.
pub fn multiply_dose(dose: &Cell, count: u32) -> Cell {
    if dose.is_blank() || count == 0 {
        return Cell::Empty;
    }
    if let Cell::Number(n) = dose {
        return Cell::Number(n * f64::from(count));
    }

    let text = dose.to_string().trim().to_string();
    let plain = text.replace(',', "");
    let number = LEADING_NUMBER
        .get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)").expect("valid regex"))
        .find(&plain)
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match number {
        None if count == 1 => Cell::Text(text),
        None => Cell::Text(format!("{} x{}", text, count)),
        Some(value) => {
            let unit: String = UNIT
                .get_or_init(|| Regex::new(r"[a-zA-Z%]+").expect("valid regex"))
                .find_iter(&plain)
                .map(|m| m.as_str())
                .collect();
            let total = value * f64::from(count);
            if unit.is_empty() {
                Cell::Number(total)
            } else {
                Cell::Text(format!("{}{}", format_number(total), unit))
            }
        }
    }
}

/// Whether a supplement slot name refers to vitamin D3
pub fn is_vitamin_d3(name: &str) -> bool {
    VITAMIN_D3
        .get_or_init(|| Regex::new(r"(?i)\bvitamin\s*d3\b").expect("valid regex"))
        .is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        for text in ["Yes", "Yes x3", "No", "N/A"] {
            assert_eq!(TallyStatus::from_cell(&Cell::text(text)).to_string(), text);
        }
        assert_eq!(TallyStatus::from_cell(&Cell::Empty), TallyStatus::Unset);
        assert_eq!(TallyStatus::from_cell(&Cell::text("yes  x 4")), TallyStatus::Yes(4));
        assert_eq!(TallyStatus::from_cell(&Cell::text("maybe")), TallyStatus::Unset);
    }

    #[test]
    fn test_input_grammar() {
        assert_eq!(TallyInput::parse(&Cell::text("Yes")), TallyInput::Yes(1));
        assert_eq!(TallyInput::parse(&Cell::text(" y ")), TallyInput::Yes(1));
        assert_eq!(TallyInput::parse(&Cell::text("Yes x2")), TallyInput::Yes(2));
        assert_eq!(TallyInput::parse(&Cell::text("y x0")), TallyInput::Yes(1));
        assert_eq!(TallyInput::parse(&Cell::Number(3.0)), TallyInput::Yes(3));
        assert_eq!(TallyInput::parse(&Cell::text("0")), TallyInput::Ignore);
        assert_eq!(TallyInput::parse(&Cell::text("N")), TallyInput::No);
        assert_eq!(TallyInput::parse(&Cell::text("n/a")), TallyInput::NotApplicable);
        assert_eq!(TallyInput::parse(&Cell::text("later")), TallyInput::Ignore);
        assert_eq!(TallyInput::parse(&Cell::Empty), TallyInput::Ignore);
    }

    #[test]
    fn test_yes_accumulates() {
        let first = TallyInput::Yes(2).apply(&Cell::Empty);
        assert_eq!(first, Cell::text("Yes x2"));
        let second = TallyInput::Yes(1).apply(&first);
        assert_eq!(second, Cell::text("Yes x3"));
    }

    #[test]
    fn test_huge_count_saturates() {
        let huge = TallyInput::parse(&Cell::text("yes x4294967295"));
        assert_eq!(huge, TallyInput::Yes(u32::MAX));
        assert_eq!(huge.apply(&Cell::text("Yes")), Cell::text("Yes x4294967295"));
        assert_eq!(
            TallyInput::Yes(3).apply(&Cell::text("Yes x4294967295")),
            Cell::text("Yes x4294967295")
        );
    }

    #[test]
    fn test_no_and_na_overwrite() {
        assert_eq!(TallyInput::No.apply(&Cell::text("Yes x2")), Cell::text("No"));
        assert_eq!(
            TallyInput::NotApplicable.apply(&Cell::text("No")),
            Cell::text("N/A")
        );
        assert_eq!(TallyInput::Yes(1).apply(&Cell::text("No")), Cell::text("Yes"));
    }

    #[test]
    fn test_ignore_keeps_existing() {
        assert_eq!(TallyInput::Ignore.apply(&Cell::text("odd")), Cell::text("odd"));
        assert_eq!(TallyInput::Ignore.apply(&Cell::Empty), Cell::Empty);
    }

    #[test]
    fn test_multiply_numeric_dose() {
        assert_eq!(multiply_dose(&Cell::Number(500.0), 2), Cell::Number(1000.0));
        assert_eq!(multiply_dose(&Cell::Number(500.0), 0), Cell::Empty);
        assert_eq!(multiply_dose(&Cell::Empty, 3), Cell::Empty);
    }

    #[test]
    fn test_multiply_dose_with_units() {
        assert_eq!(multiply_dose(&Cell::text("5000 mg"), 2), Cell::text("10000mg"));
        assert_eq!(multiply_dose(&Cell::text("1,000 IU"), 3), Cell::text("3000IU"));
        assert_eq!(multiply_dose(&Cell::text("2.5 g"), 1), Cell::text("2.5g"));
        assert_eq!(multiply_dose(&Cell::text("50%"), 2), Cell::text("100%"));
        assert_eq!(multiply_dose(&Cell::text("12"), 2), Cell::Number(24.0));
    }

    #[test]
    fn test_multiply_unparseable_dose() {
        assert_eq!(multiply_dose(&Cell::text("one scoop"), 1), Cell::text("one scoop"));
        assert_eq!(multiply_dose(&Cell::text("one scoop"), 2), Cell::text("one scoop x2"));
    }

    #[test]
    fn test_vitamin_d3_detection() {
        assert!(is_vitamin_d3("Vitamin D3"));
        assert!(is_vitamin_d3("vitamin d3 + K2"));
        assert!(is_vitamin_d3("VitaminD3"));
        assert!(!is_vitamin_d3("Vitamin D"));
        assert!(!is_vitamin_d3("Fish Oil"));
    }
}
