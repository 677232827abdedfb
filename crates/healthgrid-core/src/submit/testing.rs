//! Fixtures shared by orchestrator tests

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::FixedClock;
use crate::config::GridConfig;
use crate::grid::{Cell, CellRef, MemoryWorkbook, Sheet, Workbook};
use crate::layout::Layout;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

pub fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    day(d).and_hms_opt(h, m, 0).unwrap()
}

/// Everything an [`Engine`](super::Engine) borrows, owned in one place
pub struct Fixture {
    pub wb: MemoryWorkbook,
    pub layout: Layout,
    pub config: GridConfig,
    pub clock: FixedClock,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            wb: MemoryWorkbook::new(),
            layout: Layout::default(),
            config: GridConfig::default(),
            clock: FixedClock(at(10, 14, 30)),
        }
    }

    pub fn engine(&mut self) -> super::Engine<'_> {
        super::Engine::new(&mut self.wb, &self.layout, &self.config, &self.clock)
    }

    pub fn cell(&self, sheet: Sheet, a1: &str) -> Cell {
        self.wb.read_cell(sheet, CellRef::a1(a1).unwrap()).unwrap()
    }

    pub fn set(&mut self, sheet: Sheet, a1: &str, values: Vec<Cell>) {
        let at = CellRef::a1(a1).unwrap();
        self.wb.write(sheet, at.row, at.col, &[values]).unwrap();
    }
}

pub fn nutrients(values: &[(usize, f64)]) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; 17];
    for &(i, v) in values {
        cells[i] = Cell::Number(v);
    }
    cells
}
