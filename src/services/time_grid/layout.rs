//! Slat rows and the geometry built from them.

use chrono::Duration;

use super::TimeGrid;
use crate::models::schedule::SlotMode;
use crate::services::coord_cache::{Axis, CoordinateCache, GridGeometry, Span};
use crate::services::day_table::DayTable;
use crate::utils::date::{format_end_time_of_day, format_time_of_day, MS_PER_MINUTE};

/// What a slat row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlatRowKind {
    /// A uniform slat.
    Slat,
    /// The custom slot at this index.
    Slot(usize),
    /// Space between two custom slots; not addressable by hits.
    Break,
}

/// One horizontal row of the grid, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SlatRow {
    pub kind: SlatRowKind,
    /// Time-of-day offsets covered by the row.
    pub start: Duration,
    pub end: Duration,
    pub height: f64,
    pub label: Option<String>,
    pub is_minor: bool,
    pub classes: Vec<String>,
}

impl SlatRow {
    pub fn is_break(&self) -> bool {
        self.kind == SlatRowKind::Break
    }
}

/// Which side of the day columns carries the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
}

/// Where the grid sits in pointer space and how wide its day columns are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    pub left: f64,
    pub top: f64,
    pub col_width: f64,
}

impl GridFrame {
    pub fn new(left: f64, top: f64, col_width: f64) -> Self {
        Self { left, top, col_width }
    }
}

impl<D: DayTable> TimeGrid<D> {
    pub fn axis_side(&self) -> AxisSide {
        if self.days.is_rtl() {
            AxisSide::Right
        } else {
            AxisSide::Left
        }
    }

    /// Rows of the slat area, top to bottom.
    pub fn slat_rows(&self) -> Vec<SlatRow> {
        match &self.schedule.mode {
            SlotMode::Uniform => self.uniform_rows(),
            SlotMode::Custom(_) => self.custom_rows(),
        }
    }

    fn uniform_rows(&self) -> Vec<SlatRow> {
        let schedule = &self.schedule;
        let interval_ms = schedule.label_interval.num_milliseconds();
        let mut rows = Vec::new();
        let mut slot_time = self.profile.min_time;
        let mut elapsed = Duration::zero();

        while slot_time < self.profile.max_time {
            let is_labeled = interval_ms > 0 && elapsed.num_milliseconds() % interval_ms == 0;
            rows.push(SlatRow {
                kind: SlatRowKind::Slat,
                start: slot_time,
                end: slot_time + schedule.slot_duration,
                height: self.metrics.slat_height,
                label: is_labeled.then(|| format_time_of_day(slot_time, &schedule.label_format)),
                is_minor: !is_labeled,
                classes: if is_labeled { Vec::new() } else { vec!["minor".to_string()] },
            });
            slot_time = slot_time + schedule.slot_duration;
            elapsed = elapsed + schedule.slot_duration;
        }

        rows
    }

    fn custom_rows(&self) -> Vec<SlatRow> {
        let Some(custom) = self.schedule.custom() else {
            return Vec::new();
        };
        let format = self.schedule.label_format.as_str();
        let scale = self.metrics.pixels_per_minute / MS_PER_MINUTE as f64;
        let slots = custom.slots();
        let mut rows = Vec::with_capacity(slots.len() * 2);

        for (index, slot) in slots.iter().enumerate() {
            let label = (custom.show_minor_slot_time || !slot.minor).then(|| {
                let mut text = format_time_of_day(slot.start.as_duration(), format);
                if custom.show_slot_end_time {
                    text.push('\n');
                    text.push_str(&format_end_time_of_day(slot.end.as_duration(), format));
                }
                text
            });

            let mut classes = slot.class_names.clone();
            classes.push(if slot.minor { "minor" } else { "major" }.to_string());

            rows.push(SlatRow {
                kind: SlatRowKind::Slot(index),
                start: slot.start.as_duration(),
                end: slot.end.as_duration(),
                height: slot.duration_ms() as f64 * scale,
                label,
                is_minor: slot.minor,
                classes,
            });

            if let Some(next) = slots.get(index + 1) {
                let gap_ms = next.start.as_ms() - slot.end.as_ms();
                if gap_ms > 0 {
                    rows.push(SlatRow {
                        kind: SlatRowKind::Break,
                        start: slot.end.as_duration(),
                        end: next.start.as_duration(),
                        height: gap_ms as f64 * scale,
                        label: None,
                        is_minor: false,
                        classes: vec!["break".to_string()],
                    });
                }
            }
        }

        rows
    }

    /// Stack the slat rows under `frame.top` and the day columns right of
    /// `frame.left`, and use the result as the grid geometry.
    pub fn layout(&mut self, frame: GridFrame) -> &GridGeometry {
        let mut cursor = frame.top;
        let mut spans = Vec::new();
        for row in self.slat_rows() {
            let next = cursor + row.height.max(0.0);
            if !row.is_break() {
                spans.push(Span::new(cursor, next));
            }
            cursor = next;
        }

        let slats = CoordinateCache::new(Axis::Vertical, frame.top, spans);
        let widths = vec![frame.col_width.max(0.0); self.days.col_count()];
        let cols = CoordinateCache::from_sizes(Axis::Horizontal, frame.left, &widths);

        self.set_geometry(GridGeometry::new(slats, cols, cursor - frame.top));
        &self.geometry
    }
}
