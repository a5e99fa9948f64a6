// Property-based tests for time/pixel coordinates
// Random schedules and pointer positions checked against the grid's invariants

mod fixtures;

use agenda_timegrid::models::settings::GridOptions;
use chrono::Duration;
use fixtures::{options, week_grid};
use proptest::prelude::*;
use serde_json::{json, Value};

fn hm(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Uniform options with random slot size, snap divisor and window.
fn uniform_options() -> impl Strategy<Value = GridOptions> {
    (
        prop::sample::select(vec![10i64, 15, 20, 30, 60]),
        prop::sample::select(vec![1i64, 2, 5]),
        0i64..10,
        12i64..=24,
        10.0f64..60.0,
    )
        .prop_map(|(slot, divisor, min_hour, max_hour, slat_height)| GridOptions {
            slot_duration: hm(slot),
            snap_duration: Some(hm((slot / divisor).max(1))),
            min_time: format!("{:02}:00", min_hour),
            max_time: format!("{:02}:00", max_hour),
            slat_height,
            ..Default::default()
        })
}

/// Custom slots: consecutive (start, length, gap) triples in minutes.
fn custom_slots() -> impl Strategy<Value = Value> {
    prop::collection::vec((5i64..90, 0i64..45), 1..8).prop_map(|parts| {
        let mut cursor = 6 * 60;
        let slots: Vec<Value> = parts
            .into_iter()
            .map(|(length, gap)| {
                let start = cursor;
                let end = start + length;
                cursor = end + gap;
                json!({"start": hm(start), "end": hm(end)})
            })
            .collect();
        Value::Array(slots)
    })
}

proptest! {
    /// Property: positions never move up as time moves forward
    #[test]
    fn prop_uniform_monotonic(options in uniform_options(), a in 0i64..1440, b in 0i64..1440) {
        let grid = week_grid(&options, 0.0, 0.0);
        let (early, late) = (a.min(b), a.max(b));
        let early_top = grid.compute_time_top(Duration::minutes(early));
        let late_top = grid.compute_time_top(Duration::minutes(late));
        prop_assert!(early_top <= late_top + 1e-9);
        prop_assert_eq!(grid.compute_time_top(grid.min_time()), 0.0);
    }

    /// Property: custom slot positions are monotonic and continuous across
    /// every slot and break boundary
    #[test]
    fn prop_custom_continuous(slots in custom_slots(), probe in 300i64..1200) {
        let options = GridOptions { slots: Some(slots), ..Default::default() };
        let grid = week_grid(&options, 0.0, 0.0);
        let custom = grid.schedule().custom().unwrap();

        for slot in custom.slots() {
            for boundary in [slot.start.as_ms(), slot.end.as_ms()] {
                let at = grid.compute_time_top(Duration::milliseconds(boundary));
                let before = grid.compute_time_top(Duration::milliseconds(boundary - 1));
                let after = grid.compute_time_top(Duration::milliseconds(boundary + 1));
                prop_assert!((at - before).abs() < 0.01, "jump before {}: {} vs {}", boundary, before, at);
                prop_assert!((after - at).abs() < 0.01, "jump after {}: {} vs {}", boundary, at, after);
            }
        }

        let here = grid.compute_time_top(Duration::minutes(probe));
        let later = grid.compute_time_top(Duration::minutes(probe + 1));
        prop_assert!(here <= later + 1e-9);
    }

    /// Property: the time of a hit's snap is drawn inside the hit
    #[test]
    fn prop_hit_round_trip(options in uniform_options(), x in 0.0f64..700.0, y_frac in 0.0f64..1.0) {
        let grid = week_grid(&options, 0.0, 0.0);
        let y = y_frac * grid.geometry().total_height;

        if let Some(hit) = grid.query_hit(x, y) {
            prop_assert!(hit.left <= x && x < hit.right);
            let top = grid.compute_time_top(grid.compute_snap_time(hit.snap));
            prop_assert!(hit.top - 1e-6 <= top && top <= hit.bottom + 1e-6,
                "snap {} at {} outside [{}, {}]", hit.snap, top, hit.top, hit.bottom);
        }
    }

    /// Property: on custom slots, with or without slot snapping, a hit's
    /// snap time is drawn inside the hit and its footprint covers the time
    /// under the pointer
    #[test]
    fn prop_custom_hit_round_trip(
        slots in custom_slots(),
        snap in prop::sample::select(vec![5i64, 10, 15, 30]),
        snap_on_slots in any::<bool>(),
        x in 0.0f64..700.0,
        y_frac in 0.0f64..1.0,
    ) {
        let options = GridOptions {
            slots: Some(slots),
            snap_duration: Some(hm(snap)),
            snap_on_slots: snap_on_slots.then(|| json!(true)),
            ..Default::default()
        };
        let grid = week_grid(&options, 0.0, 0.0);
        let y = y_frac * grid.geometry().total_height;

        if let Some(hit) = grid.query_hit(x, y) {
            let top = grid.compute_time_top(grid.compute_snap_time(hit.snap));
            prop_assert!(hit.top - 1e-6 <= top && top <= hit.bottom + 1e-6,
                "snap {} at {} outside [{}, {}]", hit.snap, top, hit.top, hit.bottom);

            let footprint = grid.hit_footprint(&hit).unwrap();
            let day = fixtures::dates::at(hit.col as i64, 0, 0);
            let start_top = grid.compute_date_top(footprint.range.start_ms, day);
            let end_top = grid.compute_date_top(footprint.range.end_ms, day);
            prop_assert!(start_top - 1e-6 <= y && y <= end_top + 1e-6,
                "pointer {} outside footprint drawn at [{}, {}]", y, start_top, end_top);
            if !snap_on_slots {
                prop_assert_eq!(footprint.range.duration_ms(), snap * 60_000);
            }
        }
    }

    /// Property: every slice of a range has at least the minimum height
    #[test]
    fn prop_segments_keep_min_height(start in 0i64..(7 * 1440), length in 1i64..600) {
        let grid = week_grid(&options::working_day(), 0.0, 0.0);
        let base = fixtures::dates::at(0, 0, 0);
        let range = agenda_timegrid::models::time_range::TimeRange::new(
            base + start * 60_000,
            base + (start + length) * 60_000,
        );
        let mut segs = grid.slice_range_by_times(&range);
        grid.compute_seg_verticals(&mut segs);
        for seg in segs {
            prop_assert!(seg.height().unwrap() >= 12.0 - 1e-9);
        }
    }
}
