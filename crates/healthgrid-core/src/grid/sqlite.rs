//! SQLite-backed workbook

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Block, Cell, CellRef, Range, Sheet, Workbook};
use crate::error::{HealthError, Result};
use crate::map_store_err;

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- One row per non-blank cell
CREATE TABLE IF NOT EXISTS cells (
    sheet TEXT NOT NULL,
    row INTEGER NOT NULL,
    col INTEGER NOT NULL,
    kind TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (sheet, row, col)
);
CREATE INDEX IF NOT EXISTS idx_cells_col ON cells(sheet, col, row);

-- Input cells bound to a block of allowed suggestions
CREATE TABLE IF NOT EXISTS validations (
    sheet TEXT NOT NULL,
    row INTEGER NOT NULL,
    col INTEGER NOT NULL,
    source_row INTEGER NOT NULL,
    source_col INTEGER NOT NULL,
    source_height INTEGER NOT NULL,
    source_width INTEGER NOT NULL,
    PRIMARY KEY (sheet, row, col)
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Workbook persisted in a SQLite database file
#[derive(Debug)]
pub struct SqliteWorkbook {
    conn: Connection,
}

impl SqliteWorkbook {
    /// Open or create the workbook database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            HealthError::Other(format!(
                "failed to open workbook at {}: {}",
                path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| map_store_err!("enable WAL mode", e))?;

        Self::with_connection(conn)
    }

    /// Workbook backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| map_store_err!("open workbook", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| map_store_err!("create workbook schema", e))?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('schema_version', ?1)",
            params![CURRENT_SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| map_store_err!("record schema version", e))?;

        Ok(SqliteWorkbook { conn })
    }

    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(CURRENT_SCHEMA_VERSION))
                },
            )
            .map_err(|e| map_store_err!("get schema version", e))
    }
}

fn encode(cell: &Cell) -> Option<(&'static str, String)> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) if s.is_empty() => None,
        Cell::Text(s) => Some(("text", s.clone())),
        Cell::Number(n) => Some(("number", n.to_string())),
        Cell::Date(d) => Some(("date", d.format("%Y-%m-%d").to_string())),
        Cell::DateTime(dt) => Some(("datetime", dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        Cell::Time(t) => Some(("time", t.format("%H:%M:%S%.f").to_string())),
    }
}

fn decode(sheet: Sheet, row: usize, col: usize, kind: &str, value: String) -> Result<Cell> {
    let malformed = |reason: String| HealthError::MalformedCell {
        sheet: sheet.name().to_string(),
        row,
        col,
        reason,
    };

    match kind {
        "text" => Ok(Cell::Text(value)),
        "number" => value
            .parse()
            .map(Cell::Number)
            .map_err(|e| malformed(format!("{}: {}", value, e))),
        "date" => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Cell::Date)
            .map_err(|e| malformed(format!("{}: {}", value, e))),
        "datetime" => NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(Cell::DateTime)
            .map_err(|e| malformed(format!("{}: {}", value, e))),
        "time" => NaiveTime::parse_from_str(&value, "%H:%M:%S%.f")
            .map(Cell::Time)
            .map_err(|e| malformed(format!("{}: {}", value, e))),
        other => Err(malformed(format!("unknown cell kind {}", other))),
    }
}

impl Workbook for SqliteWorkbook {
    fn read(&self, sheet: Sheet, range: Range) -> Result<Block> {
        let mut block = vec![vec![Cell::Empty; range.width]; range.height];
        if range.is_empty() {
            return Ok(block);
        }

        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT row, col, kind, value FROM cells
                 WHERE sheet = ?1 AND row BETWEEN ?2 AND ?3 AND col BETWEEN ?4 AND ?5",
            )
            .map_err(|e| map_store_err!("prepare block read", e))?;

        let rows = stmt
            .query_map(
                params![
                    sheet.name(),
                    range.row as i64,
                    range.last_row() as i64,
                    range.col as i64,
                    range.last_col() as i64
                ],
                |r| {
                    Ok((
                        r.get::<_, i64>(0)? as usize,
                        r.get::<_, i64>(1)? as usize,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                    ))
                },
            )
            .map_err(|e| map_store_err!("read block", e))?;

        for row in rows {
            let (r, c, kind, value) = row.map_err(|e| map_store_err!("read cell", e))?;
            block[r - range.row][c - range.col] = decode(sheet, r, c, &kind, value)?;
        }

        Ok(block)
    }

    fn write(&mut self, sheet: Sheet, row: usize, col: usize, block: &[Vec<Cell>]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| map_store_err!("begin block write", e))?;

        for (r, values) in block.iter().enumerate() {
            for (c, value) in values.iter().enumerate() {
                let (row, col) = ((row + r) as i64, (col + c) as i64);
                match encode(value) {
                    Some((kind, text)) => tx.execute(
                        "INSERT OR REPLACE INTO cells (sheet, row, col, kind, value)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![sheet.name(), row, col, kind, text],
                    ),
                    None => tx.execute(
                        "DELETE FROM cells WHERE sheet = ?1 AND row = ?2 AND col = ?3",
                        params![sheet.name(), row, col],
                    ),
                }
                .map_err(|e| map_store_err!("write cell", e))?;
            }
        }

        tx.commit().map_err(|e| map_store_err!("commit block write", e))
    }

    fn clear(&mut self, sheet: Sheet, range: Range) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        self.conn
            .execute(
                "DELETE FROM cells
                 WHERE sheet = ?1 AND row BETWEEN ?2 AND ?3 AND col BETWEEN ?4 AND ?5",
                params![
                    sheet.name(),
                    range.row as i64,
                    range.last_row() as i64,
                    range.col as i64,
                    range.last_col() as i64
                ],
            )
            .map_err(|e| map_store_err!("clear block", e))?;
        Ok(())
    }

    fn clear_sheet(&mut self, sheet: Sheet) -> Result<()> {
        self.conn
            .execute("DELETE FROM cells WHERE sheet = ?1", params![sheet.name()])
            .map_err(|e| map_store_err!("clear sheet", e))?;
        Ok(())
    }

    fn last_row(&self, sheet: Sheet) -> Result<usize> {
        let max: Option<i64> = self
            .conn
            .query_row(
                "SELECT MAX(row) FROM cells WHERE sheet = ?1",
                params![sheet.name()],
                |r| r.get(0),
            )
            .map_err(|e| map_store_err!("get last row", e))?;
        Ok(max.unwrap_or(0) as usize)
    }

    fn bind_validation(&mut self, sheet: Sheet, cell: CellRef, source: Range) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO validations
                 (sheet, row, col, source_row, source_col, source_height, source_width)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    sheet.name(),
                    cell.row as i64,
                    cell.col as i64,
                    source.row as i64,
                    source.col as i64,
                    source.height as i64,
                    source.width as i64
                ],
            )
            .map_err(|e| map_store_err!("bind validation", e))?;
        Ok(())
    }

    fn validation(&self, sheet: Sheet, cell: CellRef) -> Result<Option<Range>> {
        self.conn
            .query_row(
                "SELECT source_row, source_col, source_height, source_width FROM validations
                 WHERE sheet = ?1 AND row = ?2 AND col = ?3",
                params![sheet.name(), cell.row as i64, cell.col as i64],
                |r| {
                    Ok(Range::new(
                        r.get::<_, i64>(0)? as usize,
                        r.get::<_, i64>(1)? as usize,
                        r.get::<_, i64>(2)? as usize,
                        r.get::<_, i64>(3)? as usize,
                    ))
                },
            )
            .optional()
            .map_err(|e| map_store_err!("get validation", e))
    }
}

impl Drop for SqliteWorkbook {
    fn drop(&mut self) {
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}
