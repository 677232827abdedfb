//! Named storage schema for every family
//!
//! This is the only module that knows where things live on the sheets.
//! Everything else addresses data through these structs.

use crate::grid::{CellRef, Range, Sheet};

/// Attribute values carried by every catalog entry and nutrition row
pub const NUTRIENT_COUNT: usize = 17;

/// Position of vitamin D within the nutrient vector
pub const VITAMIN_D_INDEX: usize = 14;

/// Status slots tracked per day for supplements
pub const SUPPLEMENT_SLOTS: usize = 8;

/// Status slots tracked per day for skincare
pub const SKINCARE_SLOTS: usize = 4;

/// A sorted reference catalog: `[name, measure, NUTRIENT_COUNT attributes]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogBlock {
    pub sheet: Sheet,
    pub start_row: usize,
    pub name_col: usize,
}

impl CatalogBlock {
    pub const WIDTH: usize = 2 + NUTRIENT_COUNT;

    pub fn first_attribute_col(&self) -> usize {
        self.name_col + 2
    }
}

/// A date-keyed table: a date column followed by `width` payload columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTable {
    pub sheet: Sheet,
    pub start_row: usize,
    pub date_col: usize,
    pub width: usize,
}

impl DailyTable {
    pub fn payload_col(&self) -> usize {
        self.date_col + 1
    }
}

/// A reverse-chronological log block: timestamp, label and optional quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogBlock {
    pub sheet: Sheet,
    pub start_row: usize,
    pub start_col: usize,
    pub width: usize,
}

/// Columns that receive one appended value each per submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSeries {
    pub sheet: Sheet,
    pub start_row: usize,
    pub cols: Vec<usize>,
}

/// Name → dose lookup table for supplements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseTable {
    pub sheet: Sheet,
    pub start_row: usize,
    pub name_col: usize,
}

/// Input cells and preview locations on the input sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub weight: Range,
    pub weight_preview: Range,
    pub body_fat: Range,
    pub body_fat_preview: Range,
    pub nutrition: Range,
    pub nutrition_preview_date: CellRef,
    pub nutrition_preview_totals: Range,
    pub water: Range,
    pub water_preview: Range,
    pub supplements: Range,
    pub supplement_names: Range,
    pub supplement_preview: Range,
    pub skincare: Range,
    pub skincare_names: Range,
    pub skincare_preview: Range,
    pub stimulant: Range,
    pub stimulant_preview: Range,
    /// Date cells refilled with today's date whenever they are blank
    pub date_cells: Vec<Range>,
}

impl InputLayout {
    /// Column of the name cell in each nutrition input row
    pub fn nutrition_name_col(&self) -> usize {
        self.nutrition.col + 1
    }

    pub fn previews(&self) -> Vec<Range> {
        vec![
            Range::cell(self.nutrition_preview_date),
            self.nutrition_preview_totals,
            self.water_preview,
            self.supplement_preview,
            self.skincare_preview,
            self.stimulant_preview,
        ]
    }
}

/// Full workbook layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub food_catalog: CatalogBlock,
    pub drink_catalog: CatalogBlock,
    pub nutrition_table: DailyTable,
    pub water_table: DailyTable,
    pub supplement_table: DailyTable,
    pub skincare_table: DailyTable,
    /// Stimulant events: date, yes/no, time of day
    pub stimulant_table: DailyTable,
    pub weight_series: AppendSeries,
    pub body_fat_series: AppendSeries,
    pub nutrition_log: LogBlock,
    pub supplement_log: LogBlock,
    pub skincare_log: LogBlock,
    pub doses: DoseTable,
    pub inputs: InputLayout,
}

const fn daily(date_col: usize, width: usize) -> DailyTable {
    DailyTable {
        sheet: Sheet::DataTables,
        start_row: 4,
        date_col,
        width,
    }
}

const fn log(start_col: usize, width: usize) -> LogBlock {
    LogBlock {
        sheet: Sheet::TimeTables,
        start_row: 4,
        start_col,
        width,
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            // B3:T and V3:AN
            food_catalog: CatalogBlock {
                sheet: Sheet::Reference,
                start_row: 3,
                name_col: 2,
            },
            drink_catalog: CatalogBlock {
                sheet: Sheet::Reference,
                start_row: 3,
                name_col: 22,
            },
            // L:AC, AE:AF, AH:AP, AR:AV, AX:AZ
            nutrition_table: daily(12, NUTRIENT_COUNT),
            water_table: daily(31, 1),
            supplement_table: daily(34, SUPPLEMENT_SLOTS),
            skincare_table: daily(44, SKINCARE_SLOTS),
            stimulant_table: daily(50, 2),
            weight_series: AppendSeries {
                sheet: Sheet::DataTables,
                start_row: 4,
                cols: vec![2, 3],
            },
            body_fat_series: AppendSeries {
                sheet: Sheet::DataTables,
                start_row: 4,
                cols: vec![6, 7, 9],
            },
            // B:D, F:H, J:K
            nutrition_log: log(2, 3),
            supplement_log: log(6, 3),
            skincare_log: log(10, 2),
            doses: DoseTable {
                sheet: Sheet::Supplements,
                start_row: 4,
                name_col: 2,
            },
            inputs: InputLayout::default(),
        }
    }
}

impl Default for InputLayout {
    fn default() -> Self {
        InputLayout {
            weight: Range::new(4, 2, 1, 2),
            weight_preview: Range::new(8, 2, 1, 2),
            body_fat: Range::new(4, 5, 1, 3),
            body_fat_preview: Range::new(8, 5, 1, 3),
            // I4:AD13
            nutrition: Range::new(4, 9, 10, 5 + NUTRIENT_COUNT),
            nutrition_preview_date: CellRef::new(17, 9),
            nutrition_preview_totals: Range::new(17, 14, 1, NUTRIENT_COUNT),
            water: Range::new(4, 32, 1, 2),
            water_preview: Range::new(8, 32, 1, 2),
            // AI4:AQ4, names in AJ3:AQ3
            supplements: Range::new(4, 35, 1, 1 + SUPPLEMENT_SLOTS),
            supplement_names: Range::new(3, 36, 1, SUPPLEMENT_SLOTS),
            supplement_preview: Range::new(8, 35, 1, 1 + SUPPLEMENT_SLOTS),
            // AS4:AW4, names in AT3:AW3
            skincare: Range::new(4, 45, 1, 1 + SKINCARE_SLOTS),
            skincare_names: Range::new(3, 46, 1, SKINCARE_SLOTS),
            skincare_preview: Range::new(8, 45, 1, 1 + SKINCARE_SLOTS),
            stimulant: Range::new(4, 51, 1, 2),
            stimulant_preview: Range::new(8, 51, 1, 2),
            date_cells: vec![
                Range::new(4, 2, 1, 1),
                Range::new(4, 5, 1, 1),
                Range::new(4, 9, 5, 1),
                Range::new(4, 32, 1, 1),
                Range::new(4, 35, 1, 1),
                Range::new(4, 45, 1, 1),
                Range::new(4, 51, 1, 1),
            ],
        }
    }
}
