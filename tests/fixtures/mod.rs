// Test fixtures - reusable grids and dates
// Provides consistent test data across all test files

#![allow(dead_code)]

use agenda_timegrid::models::settings::GridOptions;
use agenda_timegrid::services::day_table::DayColumns;
use agenda_timegrid::services::time_grid::{GridFrame, TimeGrid};
use agenda_timegrid::utils::date::{date_to_ms, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use chrono::NaiveDate;
use serde_json::json;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 6 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Milliseconds at `hour:minute` on the `day`-th day after Monday.
    pub fn at(day: i64, hour: i64, minute: i64) -> i64 {
        date_to_ms(monday()) + day * MS_PER_DAY + hour * MS_PER_HOUR + minute * MS_PER_MINUTE
    }
}

/// Sample grid options for testing
pub mod options {
    use super::*;

    /// 08:00-18:00, 30 minute slats of 20px, 10 minute snaps
    pub fn working_day() -> GridOptions {
        GridOptions {
            slot_duration: "00:30".into(),
            snap_duration: Some("00:10".into()),
            min_time: "08:00".into(),
            max_time: "18:00".into(),
            slat_height: 20.0,
            agenda_event_min_height: 12.0,
            ..Default::default()
        }
    }

    /// School periods with a lunch break, snapping to whole periods
    pub fn school_periods() -> GridOptions {
        GridOptions {
            slots: Some(json!([
                {"start": "08:30", "end": "09:20", "className": "period"},
                {"start": "09:20", "end": "10:10", "className": ["period", "double"]},
                {"start": "10:10", "end": "10:30", "minor": true},
                {"start": "10:30", "end": "11:20"},
                {"start": "12:00", "end": "12:50"}
            ])),
            snap_on_slots: Some(json!(true)),
            show_minor_slot_time: false,
            ..Default::default()
        }
    }
}

/// A week grid laid out at `(left, top)` with 100px columns.
pub fn week_grid(options: &GridOptions, left: f64, top: f64) -> TimeGrid<DayColumns> {
    let days = DayColumns::week_of(dates::monday(), 1, options.is_rtl);
    let mut grid = TimeGrid::from_options(options, days);
    grid.layout(GridFrame::new(left, top, 100.0));
    grid
}
