// Time range module
// Half-open unzoned millisecond intervals and footprints

use serde::{Deserialize, Serialize};

/// Half-open `[start_ms, end_ms)` interval of unzoned milliseconds.
///
/// `is_start`/`is_end` record whether each boundary is the true boundary of
/// the original range, or the result of clipping it (for example by a day
/// column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
    pub is_start: bool,
    pub is_end: bool,
}

impl TimeRange {
    /// Create an unclipped range. Reversed bounds are swapped so that
    /// `start_ms <= end_ms` always holds.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self {
            start_ms: start_ms.min(end_ms),
            end_ms: start_ms.max(end_ms),
            is_start: true,
            is_end: true,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    pub fn contains_ms(&self, ms: i64) -> bool {
        self.start_ms <= ms && ms < self.end_ms
    }

    /// Intersect `self` with `constraint`. Returns `None` when the overlap is
    /// empty. Boundary flags stay set only where `self`'s own boundary
    /// survived the clip.
    pub fn intersect(&self, constraint: &TimeRange) -> Option<TimeRange> {
        let start_ms = self.start_ms.max(constraint.start_ms);
        let end_ms = self.end_ms.min(constraint.end_ms);

        if start_ms >= end_ms {
            return None;
        }

        Some(TimeRange {
            start_ms,
            end_ms,
            is_start: self.is_start && start_ms == self.start_ms,
            is_end: self.is_end && end_ms == self.end_ms,
        })
    }
}

/// A span of calendar time independent of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFootprint {
    pub range: TimeRange,
    pub is_all_day: bool,
}

impl ComponentFootprint {
    pub fn new(range: TimeRange, is_all_day: bool) -> Self {
        Self { range, is_all_day }
    }

    pub fn timed(start_ms: i64, end_ms: i64) -> Self {
        Self::new(TimeRange::new(start_ms, end_ms), false)
    }
}
