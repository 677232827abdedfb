//! Month-grid layout for activity data
//!
//! Each year gets a 34-row block: a header row, a titles row, 31 day rows
//! and a totals row. Months sit side by side in bands of four columns.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::DailyActivity;
use crate::error::Result;
use crate::grid::{Cell, Sheet, Workbook};

pub const KM_TO_MI: f64 = 0.621371;

const DAY_ROWS: usize = 31;
const BLOCK_ROWS: usize = DAY_ROWS + 3;
const BAND_WIDTH: usize = 4;
const TITLES: [&str; BAND_WIDTH] = ["Date", "Steps", "Distance Mi", "Distance Km"];
const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Debug, Default)]
struct MonthBand {
    rows: Vec<Vec<Cell>>,
    steps: u64,
    km: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub years: Vec<i32>,
    pub days: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn distance_cells(km: f64) -> [Cell; 2] {
    [Cell::Number(round2(km * KM_TO_MI)), Cell::Number(round2(km))]
}

/// Write the activity grid to the cardio sheet; days before `start` are ignored
pub fn write_activity_grid(wb: &mut dyn Workbook, days: &[DailyActivity], start: NaiveDate) -> Result<GridSummary> {
    let mut years: BTreeMap<i32, BTreeMap<u32, MonthBand>> = BTreeMap::new();
    let mut kept = 0;
    for day in days.iter().filter(|d| d.date >= start) {
        let band = years
            .entry(day.date.year())
            .or_default()
            .entry(day.date.month())
            .or_default();
        let km = day.meters / 1000.0;
        let [miles, kms] = distance_cells(km);
        band.rows.push(vec![
            Cell::text(day.date.format("%m/%d").to_string()),
            Cell::Number(day.steps as f64),
            miles,
            kms,
        ]);
        band.steps += day.steps;
        band.km += km;
        kept += 1;
    }

    for (index, (year, months)) in years.iter().enumerate() {
        write_year(wb, 1 + index * BLOCK_ROWS, *year, months)?;
    }

    Ok(GridSummary {
        years: years.keys().copied().collect(),
        days: kept,
    })
}

fn write_year(wb: &mut dyn Workbook, header_row: usize, year: i32, months: &BTreeMap<u32, MonthBand>) -> Result<()> {
    let empty = MonthBand::default();
    for (m, name) in MONTHS.iter().enumerate() {
        let col = m * BAND_WIDTH + 1;
        let band = months.get(&(m as u32 + 1)).unwrap_or(&empty);

        let mut block = Vec::with_capacity(BLOCK_ROWS);
        let mut header = vec![Cell::text(format!("{} {}", name, year))];
        header.resize(BAND_WIDTH, Cell::Empty);
        block.push(header);
        block.push(TITLES.iter().map(|t| Cell::text(*t)).collect());
        block.extend(band.rows.iter().take(DAY_ROWS).cloned());
        block.resize(BLOCK_ROWS - 1, vec![Cell::Empty; BAND_WIDTH]);

        let [miles, kms] = distance_cells(band.km);
        block.push(vec![
            Cell::text("Total"),
            Cell::Number(band.steps as f64),
            miles,
            kms,
        ]);
        wb.write(Sheet::Cardio, header_row, col, &block)?;
    }
    Ok(())
}
