// Integration tests for the agenda time grid
// Covers option parsing, layout, slicing, hit testing and the now-indicator

mod fixtures;

use agenda_timegrid::models::schedule::SlotSchedule;
use agenda_timegrid::models::segment::Segment;
use agenda_timegrid::models::settings::GridOptions;
use agenda_timegrid::models::slot::TimeOfDay;
use agenda_timegrid::models::time_range::{ComponentFootprint, TimeRange};
use agenda_timegrid::services::config;
use agenda_timegrid::services::time_grid::{AxisSide, SlatRowKind, TimeCoordinateProvider};
use chrono::Duration;
use fixtures::dates::at;
use fixtures::{options, week_grid};
use pretty_assertions::assert_eq;
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
}

#[test]
fn test_overlapping_slots_are_clipped() {
    let options = GridOptions {
        slots: Some(json!([
            {"start": "09:00", "end": "11:00"},
            {"start": "10:00", "end": "12:00"}
        ])),
        ..Default::default()
    };
    let schedule = SlotSchedule::from_options(&options);
    let slots = schedule.custom().unwrap().slots();

    assert_eq!(slots[0].end, TimeOfDay::parse("10:00").unwrap());
    assert_eq!(slots[1].start, TimeOfDay::parse("10:00").unwrap());
    assert_eq!(slots[1].end, TimeOfDay::parse("12:00").unwrap());
}

#[test]
fn test_backwards_slot_becomes_empty() {
    let options = GridOptions {
        slots: Some(json!([{"start": "09:00", "end": "08:00"}])),
        ..Default::default()
    };
    let schedule = SlotSchedule::from_options(&options);
    let slot = &schedule.custom().unwrap().slots()[0];

    assert_eq!(slot.end, TimeOfDay::parse("09:00").unwrap());
    assert_eq!(slot.duration_ms(), 0);
}

#[test]
fn test_half_hour_slots_label_every_hour() {
    let schedule = SlotSchedule::from_options(&GridOptions::default());
    assert_eq!(schedule.label_interval, Duration::hours(1));

    let grid = week_grid(&options::working_day(), 0.0, 0.0);
    let labels: Vec<Option<String>> = grid.slat_rows().into_iter().take(3).map(|row| row.label).collect();
    assert_eq!(labels, vec![Some("08:00".to_string()), None, Some("09:00".to_string())]);
}

#[test]
fn test_uniform_positions() {
    let grid = week_grid(&options::working_day(), 50.0, 30.0);

    assert_eq!(grid.compute_time_top(Duration::hours(8)), 0.0);
    assert_eq!(grid.compute_time_top(Duration::minutes(8 * 60 + 15)), 10.0);
    assert_eq!(grid.compute_time_top(Duration::hours(18)), 400.0);
    assert_eq!(grid.compute_date_top(at(3, 13, 0), at(3, 0, 0)), 200.0);
    assert_eq!(grid.geometry().total_height, 400.0);
}

#[test]
fn test_hit_at_cell_centre() {
    let grid = week_grid(&options::working_day(), 50.0, 30.0);

    // column 3 spans 350..450, slat 5 spans 130..150
    let hit = grid.query_hit(400.0, 140.0).unwrap();
    assert_eq!(hit.col, 3);
    assert_eq!(hit.snap, 5 * 3 + 1);
    assert_eq!((hit.left, hit.right), (350.0, 450.0));
    assert_close(hit.top, 130.0 + 20.0 / 3.0);
    assert_close(hit.bottom, 130.0 + 40.0 / 3.0);

    let footprint = grid.hit_footprint(&hit).unwrap();
    assert_eq!(footprint.range, TimeRange::new(at(3, 10, 40), at(3, 10, 50)));
}

#[test]
fn test_no_hit_outside_grid() {
    let grid = week_grid(&options::working_day(), 50.0, 30.0);

    assert_eq!(grid.query_hit(10.0, 10.0), None);
    assert_eq!(grid.query_hit(10.0, 140.0), None);
    assert_eq!(grid.query_hit(400.0, 431.0), None);
    assert_eq!(grid.query_hit(750.0, 140.0), None);
}

#[test]
fn test_instant_segment_keeps_min_height() {
    let grid = week_grid(&options::working_day(), 0.0, 0.0);
    let instant = at(1, 9, 0);
    let mut segs = vec![Segment::from_range(&TimeRange::new(instant, instant), 1)];

    grid.compute_seg_verticals(&mut segs);
    let height = segs[0].height().unwrap();
    assert!(height >= 12.0, "height {}", height);
}

#[test]
fn test_multi_day_footprint() {
    let grid = week_grid(&options::working_day(), 0.0, 0.0);
    let footprint = ComponentFootprint::timed(at(0, 16, 0), at(2, 9, 0));
    let segs = grid.component_footprint_to_segs(&footprint);

    let cols: Vec<usize> = segs.iter().map(|seg| seg.col).collect();
    assert_eq!(cols, vec![0, 1, 2]);
    assert!(segs[0].is_start && !segs[0].is_end);
    assert!(!segs[1].is_start && !segs[1].is_end);
    assert!(!segs[2].is_start && segs[2].is_end);
    assert_eq!(segs[1].start_ms, at(1, 8, 0));
    assert_eq!(segs[1].end_ms, at(1, 18, 0));
}

#[test]
fn test_right_to_left_week() {
    let options = GridOptions {
        is_rtl: true,
        ..options::working_day()
    };
    let grid = week_grid(&options, 0.0, 0.0);

    assert_eq!(grid.axis_side(), AxisSide::Right);
    let segs = grid.component_footprint_to_segs(&ComponentFootprint::timed(at(0, 10, 0), at(0, 11, 0)));
    assert_eq!(segs[0].col, 6);

    let hit = grid.query_hit(650.0, 41.0).unwrap();
    let footprint = grid.hit_footprint(&hit).unwrap();
    assert_eq!(footprint.range.start_ms, at(0, 9, 0));
}

#[test]
fn test_school_periods_rows() {
    let grid = week_grid(&options::school_periods(), 50.0, 30.0);
    let rows = grid.slat_rows();

    let kinds: Vec<SlatRowKind> = rows.iter().map(|row| row.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SlatRowKind::Slot(0),
            SlatRowKind::Slot(1),
            SlatRowKind::Slot(2),
            SlatRowKind::Slot(3),
            SlatRowKind::Break,
            SlatRowKind::Slot(4),
        ]
    );
    assert_eq!(rows[0].label.as_deref(), Some("08:30\n09:20"));
    assert_eq!(rows[2].label, None);
    assert_eq!(rows[1].classes, vec!["period", "double", "major"]);
    assert_eq!(rows[2].classes, vec!["minor"]);
    assert_eq!(rows[4].height, 40.0);
    assert_eq!(grid.geometry().total_height, 260.0);
}

#[test]
fn test_school_periods_hits_snap_to_periods() {
    let grid = week_grid(&options::school_periods(), 50.0, 30.0);

    // Wednesday, last period
    let hit = grid.query_hit(300.0, 260.0).unwrap();
    assert_eq!(hit.col, 2);
    assert_eq!(hit.snap, 4);
    assert_eq!((hit.top, hit.bottom), (240.0, 290.0));
    let footprint = grid.hit_footprint(&hit).unwrap();
    assert_eq!(footprint.range, TimeRange::new(at(2, 12, 0), at(2, 12, 50)));

    // lunch break
    assert_eq!(grid.query_hit(300.0, 220.0), None);
}

#[test]
fn test_school_periods_break_interpolation() {
    let grid = week_grid(&options::school_periods(), 50.0, 30.0);

    assert_close(grid.compute_date_top(at(0, 11, 20), at(0, 0, 0)), 170.0);
    assert_close(grid.compute_date_top(at(0, 11, 40), at(0, 0, 0)), 190.0);
    assert_close(grid.compute_date_top(at(0, 12, 0), at(0, 0, 0)), 210.0);
    assert_close(grid.compute_date_top(at(0, 7, 0), at(0, 0, 0)), 0.0);
    assert_close(grid.compute_date_top(at(0, 15, 0), at(0, 0, 0)), 260.0);
}

#[test]
fn test_school_periods_snap_range() {
    let grid = week_grid(&options::school_periods(), 0.0, 0.0);
    let snapped = grid.snap_range(TimeRange::new(at(0, 9, 0), at(0, 9, 30)));
    assert_eq!(snapped, TimeRange::new(at(0, 8, 30), at(0, 10, 10)));
}

#[test]
fn test_now_indicator_in_week() {
    let grid = week_grid(&options::working_day(), 0.0, 0.0);
    let indicator = grid.render_now_indicator(at(2, 9, 0)).unwrap();

    assert_eq!(indicator.lines.len(), 1);
    assert_eq!(indicator.lines[0].col, 2);
    assert_eq!(indicator.lines[0].top, 40.0);
    assert_eq!(indicator.arrow, Some(40.0));
    assert_eq!(grid.next_now_indicator_refresh(at(2, 9, 0) + 59_000), 1_000);
}

#[test]
fn test_grid_from_toml_config() {
    let options = config::from_toml_str(
        r#"
slotDuration = "01:00"
minTime = "06:00"
maxTime = "10:00"
slatHeight = 50.0
"#,
    )
    .unwrap();
    let grid = week_grid(&options, 0.0, 0.0);

    assert_eq!(grid.slat_rows().len(), 4);
    assert_eq!(grid.compute_time_top(Duration::minutes(7 * 60 + 30)), 75.0);
    assert_eq!(grid.schedule().label_interval, Duration::hours(1));
}
