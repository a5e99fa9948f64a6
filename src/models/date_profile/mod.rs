// Date profile module
// The visible time window of each agenda day

use chrono::{Duration, NaiveDate};

use crate::models::settings::GridOptions;
use crate::models::time_range::TimeRange;
use crate::utils::date::date_to_ms;

/// `minTime`/`maxTime` offsets bounding the visible part of every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateProfile {
    pub min_time: Duration,
    pub max_time: Duration,
}

impl DateProfile {
    pub fn new(min_time: Duration, max_time: Duration) -> Self {
        Self { min_time, max_time }
    }

    pub fn from_options(options: &GridOptions) -> Self {
        Self::new(options.min_time(), options.max_time())
    }

    /// The visible `[minTime, maxTime)` range of `day`.
    pub fn day_range(&self, day: NaiveDate) -> TimeRange {
        let day_ms = date_to_ms(day);
        TimeRange::new(
            day_ms + self.min_time.num_milliseconds(),
            day_ms + self.max_time.num_milliseconds(),
        )
    }
}

impl Default for DateProfile {
    fn default() -> Self {
        Self::new(Duration::zero(), Duration::hours(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::MS_PER_HOUR;

    #[test]
    fn test_day_range_uses_window() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let profile = DateProfile::new(Duration::hours(8), Duration::hours(18));
        let range = profile.day_range(day);
        assert_eq!(range.start_ms, date_to_ms(day) + 8 * MS_PER_HOUR);
        assert_eq!(range.end_ms, date_to_ms(day) + 18 * MS_PER_HOUR);
    }

    #[test]
    fn test_window_past_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let profile = DateProfile::new(Duration::hours(20), Duration::hours(30));
        assert_eq!(profile.day_range(day).duration_ms(), 10 * MS_PER_HOUR);
    }
}
