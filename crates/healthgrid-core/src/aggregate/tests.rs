use super::*;
use crate::grid::{CellRef, MemoryWorkbook, Sheet};
use crate::layout::Layout;
use crate::tally::TallyInput;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn nutrients(first: f64, second: f64) -> Vec<f64> {
    let mut v = vec![0.0; 17];
    v[0] = first;
    v[1] = second;
    v
}

#[test]
fn test_water_sums_same_day() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().water_table;
    let first = upsert(&mut wb, &table, 1000, day(1), &vec![500.0], &SumPolicy).unwrap();
    assert!(first.created);
    assert_eq!(first.row, 4);
    let second = upsert(&mut wb, &table, 1000, day(1), &vec![300.0], &SumPolicy).unwrap();
    assert!(!second.created);
    assert_eq!(second.row, 4);
    assert_eq!(second.values, vec![Cell::Number(800.0)]);
    assert_eq!(rows(&wb, &table, 1000).unwrap().len(), 1);
}

#[test]
fn test_nutrition_sum_is_order_independent() {
    let table = Layout::default().nutrition_table;
    let a = nutrients(1.5, 2.0);
    let b = nutrients(4.0, 0.25);

    let mut ab = MemoryWorkbook::new();
    upsert(&mut ab, &table, 1000, day(2), &a, &SumPolicy).unwrap();
    let left = upsert(&mut ab, &table, 1000, day(2), &b, &SumPolicy).unwrap();

    let mut ba = MemoryWorkbook::new();
    upsert(&mut ba, &table, 1000, day(2), &b, &SumPolicy).unwrap();
    let right = upsert(&mut ba, &table, 1000, day(2), &a, &SumPolicy).unwrap();

    assert_eq!(left.values, right.values);
    assert_eq!(left.values[0], Cell::Number(5.5));
    assert_eq!(left.values.len(), 17);
}

#[test]
fn test_distinct_dates_get_distinct_rows() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().water_table;
    upsert(&mut wb, &table, 1000, day(1), &vec![1.0], &SumPolicy).unwrap();
    let next = upsert(&mut wb, &table, 1000, day(2), &vec![2.0], &SumPolicy).unwrap();
    assert_eq!(next.row, 5);
    assert!(find_row(&wb, &table, 1000, day(3)).unwrap().is_none());
    assert_eq!(find_row(&wb, &table, 1000, day(2)).unwrap().unwrap().row, 5);
}

#[test]
fn test_first_blank_row_is_reused() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().water_table;
    for d in 1..=3 {
        upsert(&mut wb, &table, 1000, day(d), &vec![1.0], &SumPolicy).unwrap();
    }
    wb.clear(Sheet::DataTables, Range::new(5, table.date_col, 1, 2)).unwrap();
    let reused = upsert(&mut wb, &table, 1000, day(9), &vec![7.0], &SumPolicy).unwrap();
    assert_eq!(reused.row, 5);
}

#[test]
fn test_datetime_keys_match_by_calendar_day() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().water_table;
    let stamped = day(4).and_hms_opt(21, 30, 0).unwrap();
    wb.write(
        Sheet::DataTables,
        4,
        table.date_col,
        &[vec![Cell::DateTime(stamped), Cell::Number(100.0)]],
    )
    .unwrap();
    let merged = upsert(&mut wb, &table, 1000, day(4), &vec![50.0], &SumPolicy).unwrap();
    assert_eq!(merged.row, 4);
    assert_eq!(merged.values, vec![Cell::Number(150.0)]);
}

#[test]
fn test_tally_accumulates_yes_counts() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().supplement_table;
    let mut delta = vec![TallyInput::Ignore; 8];
    delta[0] = TallyInput::Yes(2);
    delta[1] = TallyInput::NotApplicable;
    upsert(&mut wb, &table, 1000, day(5), &delta, &TallyPolicy).unwrap();

    let mut again = vec![TallyInput::Ignore; 8];
    again[0] = TallyInput::Yes(1);
    let row = upsert(&mut wb, &table, 1000, day(5), &again, &TallyPolicy).unwrap();
    assert_eq!(row.values[0], Cell::text("Yes x3"));
    assert_eq!(row.values[1], Cell::text("N/A"));
    assert_eq!(row.values[2], Cell::Empty);
}

#[test]
fn test_append_policy_never_merges() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().stimulant_table;
    let event = vec![Cell::text("Yes"), Cell::text("8:00")];
    let first = upsert(&mut wb, &table, 1000, day(6), &event, &AppendPolicy).unwrap();
    let second = upsert(&mut wb, &table, 1000, day(6), &event, &AppendPolicy).unwrap();
    assert_ne!(first.row, second.row);
    assert!(second.created);
    assert_eq!(rows(&wb, &table, 1000).unwrap().len(), 2);
}

#[test]
fn test_full_column_extends_past_scan_window() {
    let mut wb = MemoryWorkbook::new();
    let table = Layout::default().water_table;
    for d in 1..=3 {
        upsert(&mut wb, &table, 6, day(d), &vec![1.0], &SumPolicy).unwrap();
    }
    let extra = upsert(&mut wb, &table, 6, day(4), &vec![100.0], &SumPolicy).unwrap();
    assert_eq!(extra.row, 7);
    assert!(extra.created);

    // rows below the window are still found and merged
    let again = upsert(&mut wb, &table, 6, day(4), &vec![50.0], &SumPolicy).unwrap();
    assert_eq!(again.row, 7);
    assert!(!again.created);
    assert_eq!(again.values, vec![Cell::Number(150.0)]);

    let next = upsert(&mut wb, &table, 6, day(5), &vec![7.0], &SumPolicy).unwrap();
    assert_eq!(next.row, 8);
    assert_eq!(
        wb.read_cell(Sheet::DataTables, CellRef::new(7, table.date_col)).unwrap(),
        Cell::Date(day(4))
    );
    assert_eq!(find_row(&wb, &table, 6, day(4)).unwrap().unwrap().row, 7);
    assert_eq!(rows(&wb, &table, 6).unwrap().len(), 5);
}

#[test]
fn test_append_row_extends_past_scan_window() {
    let mut wb = MemoryWorkbook::new();
    let series = Layout::default().weight_series;
    let written: Vec<usize> = (1..=4)
        .map(|d| append_row(&mut wb, &series, 5, &[Cell::Date(day(d)), Cell::Number(180.0)]).unwrap())
        .collect();
    assert_eq!(written, vec![series.start_row, series.start_row + 1, series.start_row + 2, series.start_row + 3]);
}

#[test]
fn test_first_blank_index() {
    assert_eq!(first_blank_index(&[]), 0);
    assert_eq!(first_blank_index(&[Cell::Number(1.0), Cell::Empty]), 1);
    assert_eq!(first_blank_index(&[Cell::Number(1.0)]), 1);
}

#[test]
fn test_append_row_keeps_columns_aligned() {
    let mut wb = MemoryWorkbook::new();
    let series = Layout::default().body_fat_series;
    // column G already runs one row further than F and I
    wb.write_cell(Sheet::DataTables, CellRef::new(4, 7), Cell::Number(1.0)).unwrap();

    let row = append_row(
        &mut wb,
        &series,
        1000,
        &[Cell::Date(day(1)), Cell::Number(18.5), Cell::Number(40.0)],
    )
    .unwrap();
    assert_eq!(row, 5);
    assert_eq!(
        wb.read_cell(Sheet::DataTables, CellRef::new(5, 9)).unwrap(),
        Cell::Number(40.0)
    );
    assert!(wb.read_cell(Sheet::DataTables, CellRef::new(5, 8)).unwrap().is_blank());

    let next = append_row(&mut wb, &series, 1000, &[Cell::Date(day(2)), Cell::Number(18.0), Cell::Number(41.0)]).unwrap();
    assert_eq!(next, 6);
}
