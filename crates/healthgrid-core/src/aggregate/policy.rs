//! Merge policies for date-keyed tables

use crate::grid::Cell;
use crate::tally::TallyInput;

/// How a family combines a new delta into its stored payload
pub trait MergePolicy {
    type Delta;

    /// Keyed families keep one row per date; unkeyed ones append every time
    fn keyed(&self) -> bool {
        true
    }

    /// Payload for a freshly allocated row
    fn initial(&self, delta: &Self::Delta) -> Vec<Cell>;

    /// Payload after folding `delta` into `existing`
    fn merge(&self, existing: &[Cell], delta: &Self::Delta) -> Vec<Cell>;
}

/// Element-wise numeric sum (nutrition, water, vitamin D bumps)
#[derive(Debug, Clone, Copy, Default)]
pub struct SumPolicy;

impl MergePolicy for SumPolicy {
    type Delta = Vec<f64>;

    fn initial(&self, delta: &Vec<f64>) -> Vec<Cell> {
        delta.iter().map(|v| Cell::Number(*v)).collect()
    }

    fn merge(&self, existing: &[Cell], delta: &Vec<f64>) -> Vec<Cell> {
        delta
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let current = existing.get(i).map(Cell::as_number).unwrap_or(0.0);
                Cell::Number(current + v)
            })
            .collect()
    }
}

/// Per-slot tally: Yes counts accumulate, No and N/A overwrite
#[derive(Debug, Clone, Copy, Default)]
pub struct TallyPolicy;

impl MergePolicy for TallyPolicy {
    type Delta = Vec<TallyInput>;

    fn initial(&self, delta: &Vec<TallyInput>) -> Vec<Cell> {
        self.merge(&[], delta)
    }

    fn merge(&self, existing: &[Cell], delta: &Vec<TallyInput>) -> Vec<Cell> {
        delta
            .iter()
            .enumerate()
            .map(|(i, input)| input.apply(existing.get(i).unwrap_or(&Cell::Empty)))
            .collect()
    }
}

/// Unkeyed event series: every delta becomes its own row
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendPolicy;

impl MergePolicy for AppendPolicy {
    type Delta = Vec<Cell>;

    fn keyed(&self) -> bool {
        false
    }

    fn initial(&self, delta: &Vec<Cell>) -> Vec<Cell> {
        delta.clone()
    }

    fn merge(&self, _existing: &[Cell], delta: &Vec<Cell>) -> Vec<Cell> {
        delta.clone()
    }
}
