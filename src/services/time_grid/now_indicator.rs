//! Current time indicator.

use super::TimeGrid;
use crate::models::time_range::ComponentFootprint;
use crate::services::day_table::DayTable;
use crate::utils::date::MS_PER_MINUTE;

/// Granularity at which the indicator is refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NowIndicatorUnit {
    Minute,
}

impl NowIndicatorUnit {
    pub fn as_ms(&self) -> i64 {
        match self {
            NowIndicatorUnit::Minute => MS_PER_MINUTE,
        }
    }
}

/// The indicator line within one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowLine {
    pub col: usize,
    pub top: f64,
}

/// Markers for the current instant: a line in every column showing it, and
/// an arrow over the time axis when any column does.
#[derive(Debug, Clone, PartialEq)]
pub struct NowIndicator {
    pub lines: Vec<NowLine>,
    pub arrow: Option<f64>,
}

impl NowIndicator {
    pub fn is_visible(&self) -> bool {
        !self.lines.is_empty()
    }
}

impl<D: DayTable> TimeGrid<D> {
    pub fn now_indicator_unit(&self) -> NowIndicatorUnit {
        NowIndicatorUnit::Minute
    }

    /// Milliseconds from `now_ms` until the indicator should be redrawn.
    pub fn next_now_indicator_refresh(&self, now_ms: i64) -> i64 {
        let unit = self.now_indicator_unit().as_ms();
        unit - now_ms.rem_euclid(unit)
    }

    /// Markers for `now_ms`. `None` until the columns have been laid out.
    pub fn render_now_indicator(&self, now_ms: i64) -> Option<NowIndicator> {
        if !self.geometry.has_columns() {
            log::debug!("now indicator requested before columns were laid out");
            return None;
        }

        // a one millisecond range so the instant is never an empty range
        let segs = self.component_footprint_to_segs(&ComponentFootprint::timed(now_ms, now_ms + 1));
        let top = self.compute_date_top(now_ms, now_ms);

        let lines: Vec<NowLine> = segs.iter().map(|seg| NowLine { col: seg.col, top }).collect();
        let arrow = (!lines.is_empty()).then_some(top);

        Some(NowIndicator { lines, arrow })
    }
}
