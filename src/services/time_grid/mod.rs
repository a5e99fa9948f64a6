//! Agenda time grid.
//!
//! A [`TimeGrid`] is one layout session of the agenda view: an immutable
//! [`SlotSchedule`] and [`DateProfile`], the day columns, and the
//! [`GridGeometry`] measured from the last layout pass. Coordinate queries
//! read the geometry, so `layout` (or `resize`) must run again whenever the
//! grid changes size.

use chrono::Duration;

use crate::models::date_profile::DateProfile;
use crate::models::schedule::SlotSchedule;
use crate::models::segment::{Hit, Segment};
use crate::models::settings::GridOptions;
use crate::models::slot::{SnapPolicy, TimeOfDay};
use crate::models::time_range::{ComponentFootprint, TimeRange};
use crate::services::coord_cache::{Axis, CoordinateCache, GridGeometry};
use crate::services::day_table::DayTable;
use crate::utils::date::start_of_day_ms;

pub mod coords;
pub mod hits;
pub mod layout;
pub mod now_indicator;
pub mod slicing;

pub use layout::{AxisSide, GridFrame, SlatRow, SlatRowKind};
pub use now_indicator::{NowIndicator, NowIndicatorUnit, NowLine};
pub use slicing::{SegVerticalCss, SegmentContainer, SegmentView};

/// Time/pixel capability of a laid-out grid, as seen by drag, resize and
/// selection handling.
pub trait TimeCoordinateProvider {
    /// Slice a footprint into per-column segments.
    fn component_footprint_to_segs(&self, footprint: &ComponentFootprint) -> Vec<Segment>;

    /// Vertical position of `ms` within the day starting at `day_start_ms`.
    fn compute_date_top(&self, ms: i64, day_start_ms: i64) -> f64;

    /// Resolve a pointer position, or `None` outside the grid.
    fn query_hit(&self, left: f64, top: f64) -> Option<Hit>;

    /// Time span covered by a hit.
    fn hit_footprint(&self, hit: &Hit) -> Option<ComponentFootprint>;

    /// Align a range to the grid's snapping rules. The default leaves it
    /// untouched.
    fn snap_range(&self, range: TimeRange) -> TimeRange {
        range
    }
}

/// Pixel metrics that do not come from the schedule itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub min_event_height: f64,
    pub slat_height: f64,
    pub pixels_per_minute: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            min_event_height: 0.0,
            slat_height: 30.0,
            pixels_per_minute: 1.0,
        }
    }
}

impl GridMetrics {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            min_event_height: options.min_event_height(),
            slat_height: options.slat_height(),
            pixels_per_minute: options.pixels_per_minute(),
        }
    }
}

pub struct TimeGrid<D: DayTable> {
    schedule: SlotSchedule,
    profile: DateProfile,
    days: D,
    day_ranges: Vec<TimeRange>,
    metrics: GridMetrics,
    geometry: GridGeometry,
}

impl<D: DayTable> TimeGrid<D> {
    pub fn new(schedule: SlotSchedule, profile: DateProfile, days: D, metrics: GridMetrics) -> Self {
        let day_ranges = days.day_dates().iter().map(|day| profile.day_range(*day)).collect();
        Self {
            schedule,
            profile,
            days,
            day_ranges,
            metrics,
            geometry: GridGeometry::new(
                CoordinateCache::new(Axis::Vertical, 0.0, Vec::new()),
                CoordinateCache::new(Axis::Horizontal, 0.0, Vec::new()),
                0.0,
            ),
        }
    }

    pub fn from_options(options: &GridOptions, days: D) -> Self {
        Self::new(
            SlotSchedule::from_options(options),
            DateProfile::from_options(options),
            days,
            GridMetrics::from_options(options),
        )
    }

    pub fn schedule(&self) -> &SlotSchedule {
        &self.schedule
    }

    pub fn profile(&self) -> &DateProfile {
        &self.profile
    }

    pub fn days(&self) -> &D {
        &self.days
    }

    pub fn day_ranges(&self) -> &[TimeRange] {
        &self.day_ranges
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Replace the geometry with one measured elsewhere (for example from
    /// rendered widgets).
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        log::debug!(
            "time grid geometry set: {} slats, {} columns, height {}",
            geometry.slats.len(),
            geometry.cols.len(),
            geometry.total_height
        );
        self.geometry = geometry;
    }

    pub fn min_time(&self) -> Duration {
        self.profile.min_time
    }

    pub fn max_time(&self) -> Duration {
        self.profile.max_time
    }
}

impl<D: DayTable> TimeCoordinateProvider for TimeGrid<D> {
    fn component_footprint_to_segs(&self, footprint: &ComponentFootprint) -> Vec<Segment> {
        TimeGrid::component_footprint_to_segs(self, footprint)
    }

    fn compute_date_top(&self, ms: i64, day_start_ms: i64) -> f64 {
        TimeGrid::compute_date_top(self, ms, day_start_ms)
    }

    fn query_hit(&self, left: f64, top: f64) -> Option<Hit> {
        TimeGrid::query_hit(self, left, top)
    }

    fn hit_footprint(&self, hit: &Hit) -> Option<ComponentFootprint> {
        TimeGrid::hit_footprint(self, hit)
    }

    fn snap_range(&self, range: TimeRange) -> TimeRange {
        match self.schedule.slot_snap_policy() {
            Some(policy) => self.align_to_slots(range, policy),
            None => range,
        }
    }
}

impl<D: DayTable> TimeGrid<D> {
    /// Align both edges of `range` to slot boundaries of the day it starts
    /// on, keeping them on that day.
    fn align_to_slots(&self, range: TimeRange, policy: SnapPolicy) -> TimeRange {
        let Some(custom) = self.schedule.custom() else {
            return range;
        };
        let day_ms = start_of_day_ms(range.start_ms);
        let (start, end) = custom.snap_range(
            TimeOfDay::from_ms(range.start_ms - day_ms),
            TimeOfDay::from_ms(range.end_ms - day_ms),
            policy,
        );
        TimeRange::new(day_ms + start.as_ms(), day_ms + end.as_ms())
    }
}
