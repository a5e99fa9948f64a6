//! Pixel to time: resolving pointer positions into hits and hits into time.

use chrono::Duration;

use super::coords::time_at_position_with_slots;
use super::TimeGrid;
use crate::models::segment::Hit;
use crate::models::time_range::{ComponentFootprint, TimeRange};
use crate::services::day_table::DayTable;
use crate::utils::date::date_to_ms;

impl<D: DayTable> TimeGrid<D> {
    /// Resolve a pointer position (pointer-space pixels) into a column and
    /// snap. Positions outside either cache, or over a break row, give
    /// `None`.
    pub fn query_hit(&self, left: f64, top: f64) -> Option<Hit> {
        let cols = &self.geometry.cols;
        let slats = &self.geometry.slats;

        if !cols.is_in_bounds(left) || !slats.is_in_bounds(top) {
            return None;
        }

        let col = cols.index_at(left)?;
        let slat = slats.index_at(top)?;

        let (snap, snap_top, snap_bottom) = match self.schedule.custom() {
            Some(custom) if custom.snap_on_slots.is_some() => {
                (slat as i64, slats.top_offset(slat), slats.bottom_offset(slat))
            }
            Some(custom) => {
                let origin = self.geometry.origin_top();
                let time_ms = time_at_position_with_slots(slats, custom, top - origin);
                let snap_ms = self.schedule.snap_duration.num_milliseconds().max(1);
                let snap = ((time_ms - self.profile.min_time.num_milliseconds() as f64) / snap_ms as f64).floor() as i64;
                let snap_start = self.compute_snap_time(snap);
                (
                    snap,
                    origin + self.compute_time_top(snap_start),
                    origin + self.compute_time_top(snap_start + Duration::milliseconds(snap_ms)),
                )
            }
            None => {
                let snaps_per_slot = self.schedule.snaps_per_slot.max(1);
                let slat_top = slats.top_offset(slat);
                let slat_height = slats.height(slat);
                let partial = (top - slat_top) / slat_height;
                let local_snap = ((partial * snaps_per_slot as f64).floor() as i64).clamp(0, snaps_per_slot - 1);
                let per_snap = slat_height / snaps_per_slot as f64;
                (
                    slat as i64 * snaps_per_slot + local_snap,
                    slat_top + local_snap as f64 * per_snap,
                    slat_top + (local_snap + 1) as f64 * per_snap,
                )
            }
        };

        let hit = Hit {
            col,
            snap,
            left: cols.left_offset(col),
            right: cols.right_offset(col),
            top: snap_top,
            bottom: snap_bottom,
        };
        log::debug!("hit at ({}, {}): col {} snap {}", left, top, hit.col, hit.snap);
        Some(hit)
    }

    /// Time-of-day offset at which `snap` starts.
    pub fn compute_snap_time(&self, snap: i64) -> Duration {
        match self.schedule.custom() {
            Some(custom) if custom.snap_on_slots.is_some() => {
                custom.slot_clamped(snap.max(0) as usize).start.as_duration()
            }
            _ => self.profile.min_time + Duration::milliseconds(self.schedule.snap_duration.num_milliseconds() * snap),
        }
    }

    /// The time span a hit stands for: one snap, or one whole slot when
    /// snapping to custom slots.
    pub fn hit_footprint(&self, hit: &Hit) -> Option<ComponentFootprint> {
        let day_ms = date_to_ms(self.days.cell_date(0, hit.col)?);
        let start_ms = day_ms + self.compute_snap_time(hit.snap).num_milliseconds();

        let end_ms = match self.schedule.custom() {
            Some(custom) if custom.snap_on_slots.is_some() => {
                day_ms + custom.slot_clamped(hit.snap.max(0) as usize).end.as_ms()
            }
            _ => start_ms + self.schedule.snap_duration.num_milliseconds(),
        };

        Some(ComponentFootprint::new(TimeRange::new(start_ms, end_ms), false))
    }
}
