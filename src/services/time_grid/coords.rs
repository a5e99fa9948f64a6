//! Time to pixel conversion.

use chrono::Duration;

use super::TimeGrid;
use crate::models::schedule::CustomSlots;
use crate::services::coord_cache::CoordinateCache;
use crate::services::day_table::DayTable;
use crate::utils::date::start_of_day_ms;

impl<D: DayTable> TimeGrid<D> {
    /// Top of `ms` relative to the grid. `day_start_ms` only needs to fall
    /// on the intended day; it is what disambiguates midnight.
    pub fn compute_date_top(&self, ms: i64, day_start_ms: i64) -> f64 {
        self.compute_time_top(Duration::milliseconds(ms - start_of_day_ms(day_start_ms)))
    }

    /// Top of a time-of-day offset relative to the grid.
    pub fn compute_time_top(&self, time: Duration) -> f64 {
        let slats = &self.geometry.slats;
        match self.schedule.custom() {
            Some(custom) => time_top_with_slots(slats, custom, time.num_milliseconds()),
            None => time_top_without_slots(
                slats,
                self.profile.min_time.num_milliseconds(),
                self.schedule.slot_duration.num_milliseconds(),
                time.num_milliseconds(),
            ),
        }
    }
}

/// Interpolate within uniform slats. Times before the first slat pin to the
/// top, times after the last pin to the bottom.
pub fn time_top_without_slots(slats: &CoordinateCache, min_time_ms: i64, slot_ms: i64, time_ms: i64) -> f64 {
    let len = slats.len();
    if len == 0 || slot_ms <= 0 {
        return 0.0;
    }

    // floating-point number of slats covered, 0..=len
    let coverage = ((time_ms - min_time_ms) as f64 / slot_ms as f64).clamp(0.0, len as f64);

    // furthest whole slat, 0..len
    let index = (coverage.floor() as usize).min(len - 1);

    // 1.0 when covering every slat
    let remainder = coverage - index as f64;

    slats.top_position(index) + slats.height(index) * remainder
}

/// Interpolate within custom slots and the breaks between them.
pub fn time_top_with_slots(slats: &CoordinateCache, custom: &CustomSlots, time_ms: i64) -> f64 {
    let slots = custom.slots();

    for (index, slot) in slots.iter().enumerate() {
        let start = slot.start.as_ms();

        if time_ms < start {
            if index == 0 {
                return slats.top_position(0);
            }

            // inside the break before this slot
            let previous_end = slots[index - 1].end.as_ms();
            let slat_top = slats.top_position(index);
            let previous_bottom = slats.bottom_position(index - 1);
            let break_ms = start - previous_end;
            if break_ms <= 0 {
                return slat_top;
            }
            let remainder = (start - time_ms) as f64 / break_ms as f64;
            return slat_top - (slat_top - previous_bottom) * remainder;
        }

        let end = slot.end.as_ms();
        if time_ms <= end {
            let slat_top = slats.top_position(index);
            let slot_ms = end - start;
            if slot_ms <= 0 {
                return slat_top;
            }
            let remainder = (time_ms - start) as f64 / slot_ms as f64;
            return slat_top + (slats.bottom_position(index) - slat_top) * remainder;
        }
    }

    // past the last slot
    slats.top_position(slots.len())
}

/// Inverse of [`time_top_with_slots`]: the time-of-day, in fractional ms,
/// drawn at `position` (relative to the origin). Break rows interpolate
/// between the slots around them.
pub fn time_at_position_with_slots(slats: &CoordinateCache, custom: &CustomSlots, position: f64) -> f64 {
    let slots = custom.slots();
    let Some(last) = slots.last() else {
        return 0.0;
    };

    for (index, slot) in slots.iter().enumerate() {
        let start = slot.start.as_ms() as f64;
        let slat_top = slats.top_position(index);

        if position < slat_top {
            if index == 0 {
                return start;
            }

            // inside the break before this slot
            let previous_end = slots[index - 1].end.as_ms() as f64;
            let previous_bottom = slats.bottom_position(index - 1);
            let break_px = slat_top - previous_bottom;
            if break_px <= 0.0 {
                return start;
            }
            return previous_end + (start - previous_end) * (position - previous_bottom) / break_px;
        }

        let slat_bottom = slats.bottom_position(index);
        if position < slat_bottom {
            let end = slot.end.as_ms() as f64;
            return start + (end - start) * (position - slat_top) / (slat_bottom - slat_top);
        }
    }

    last.end.as_ms() as f64
}
