// Segment module
// Day-sliced pieces of time ranges and pointer hits

use serde::{Deserialize, Serialize};

use crate::models::time_range::TimeRange;

/// The part of a time range that falls inside one day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_ms: i64,
    pub end_ms: i64,
    pub is_start: bool,
    pub is_end: bool,
    pub day_index: usize,
    /// Visual column: `day_index`, mirrored in right-to-left layouts.
    pub col: usize,
    /// Filled in by the vertical pass.
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

impl Segment {
    pub fn from_range(range: &TimeRange, day_index: usize) -> Self {
        Self {
            start_ms: range.start_ms,
            end_ms: range.end_ms,
            is_start: range.is_start,
            is_end: range.is_end,
            day_index,
            col: day_index,
            top: None,
            bottom: None,
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            is_start: self.is_start,
            is_end: self.is_end,
        }
    }

    /// Rendered height once verticals are known.
    pub fn height(&self) -> Option<f64> {
        Some(self.bottom? - self.top?)
    }
}

/// Result of resolving a pointer position against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub col: usize,
    pub snap: i64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Hit {
    /// Same column and snap as `other`; pixel bounds are not compared.
    pub fn is_same_cell(&self, other: &Hit) -> bool {
        self.col == other.col && self.snap == other.snap
    }
}
