//! Shared output formatting helpers for commands

use serde_json::{json, Value};

use healthgrid_core::error::Result;
use healthgrid_core::grid::{format_number, Cell};

/// Dispatch output by format; the json arm returns `Result`, the human arm is a block.
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}

pub(crate) use output_by_format_result;

/// Print a JSON status message with optional extra fields
pub fn print_json_status(
    status: &str,
    message: Option<&str>,
    extra_fields: &[(&str, Value)],
) -> Result<()> {
    let mut output = json!({ "status": status });

    if let Some(obj) = output.as_object_mut() {
        if let Some(msg) = message {
            obj.insert("message".to_string(), json!(msg));
        }
        for (key, value) in extra_fields {
            obj.insert(key.to_string(), value.clone());
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// JSON view of a cell: numbers stay numbers, temporal values use ISO 8601
pub fn cell_json(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Number(n) => json!(n),
        Cell::Text(s) => json!(s),
        Cell::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
        Cell::DateTime(dt) => json!(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Cell::Time(t) => json!(t.format("%H:%M:%S").to_string()),
    }
}

pub fn cells_json(cells: &[Cell]) -> Value {
    Value::Array(cells.iter().map(cell_json).collect())
}

/// Cells joined for terminal output; blanks show as `-`
pub fn cells_line(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|c| match c {
            Cell::Empty => "-".to_string(),
            Cell::Number(n) => format_number(*n),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
