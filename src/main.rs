// Agenda time grid
// Lays out one week from a grid options file and prints the result as JSON

use std::env;
use std::path::PathBuf;

use agenda_timegrid::models::settings::GridOptions;
use agenda_timegrid::services::config;
use agenda_timegrid::services::day_table::DayColumns;
use agenda_timegrid::services::time_grid::{GridFrame, TimeGrid};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use serde_json::json;

const COLUMN_WIDTH: f64 = 120.0;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let options = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            config::load_options(&path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => GridOptions::default(),
    };
    let date = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", raw))?,
        None => Local::now().date_naive(),
    };

    log::info!("Laying out agenda week of {}", date);

    let mut grid = TimeGrid::from_options(&options, DayColumns::week_of(date, 1, options.is_rtl));
    grid.layout(GridFrame::new(0.0, 0.0, COLUMN_WIDTH));

    let rows: Vec<_> = grid
        .slat_rows()
        .into_iter()
        .map(|row| {
            json!({
                "start": row.start.num_minutes(),
                "end": row.end.num_minutes(),
                "height": row.height,
                "label": row.label,
                "break": row.is_break(),
                "classes": row.classes,
            })
        })
        .collect();

    let now_ms = Utc::now().timestamp_millis();
    let now_indicator = grid.render_now_indicator(now_ms).map(|indicator| {
        json!({
            "lines": indicator.lines.iter().map(|line| json!({"col": line.col, "top": line.top})).collect::<Vec<_>>(),
            "arrow": indicator.arrow,
            "refreshInMs": grid.next_now_indicator_refresh(now_ms),
        })
    });

    let sample_hit = grid.query_hit(COLUMN_WIDTH / 2.0, grid.geometry().total_height / 2.0);
    let sample_footprint = sample_hit.as_ref().and_then(|hit| grid.hit_footprint(hit));

    let report = json!({
        "schedule": grid.schedule(),
        "axisSide": format!("{:?}", grid.axis_side()),
        "totalHeight": grid.geometry().total_height,
        "rows": rows,
        "nowIndicator": now_indicator,
        "sampleHit": sample_hit,
        "sampleFootprint": sample_footprint,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize grid report")?
    );
    Ok(())
}
