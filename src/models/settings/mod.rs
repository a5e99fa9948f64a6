// Settings module
// Agenda grid options as read from configuration files

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::date::parse_duration;

pub const DEFAULT_SLOT_DURATION: &str = "00:30:00";
pub const DEFAULT_MIN_TIME: &str = "00:00:00";
pub const DEFAULT_MAX_TIME: &str = "24:00:00";
pub const DEFAULT_LABEL_FORMAT: &str = "%H:%M";

/// `slotLabelFormat` may be a single format or a list of them, in which
/// case the most granular (last) entry is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelFormatOption {
    Single(String),
    List(Vec<String>),
}

impl LabelFormatOption {
    pub fn resolve(&self) -> Option<&str> {
        match self {
            LabelFormatOption::Single(format) => Some(format.as_str()),
            LabelFormatOption::List(formats) => formats.last().map(String::as_str),
        }
    }
}

/// Raw grid options. Loosely typed values (`slots`, `snapOnSlots`) are kept
/// as JSON values and validated once when the slot schedule is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    pub slot_duration: String,
    pub snap_duration: Option<String>,
    pub slots: Option<Value>,
    pub show_slot_end_time: bool,
    pub show_minor_slot_time: bool,
    pub snap_on_slots: Option<Value>,
    pub slot_label_format: Option<LabelFormatOption>,
    pub slot_label_interval: Option<String>,
    pub min_time: String,
    pub max_time: String,
    /// Minimum rendered height of an event segment, in pixels.
    pub agenda_event_min_height: f64,
    /// Rendered height of one uniform slat row, in pixels.
    pub slat_height: f64,
    /// Vertical scale of custom slot rows and the breaks between them.
    pub pixels_per_minute: f64,
    pub is_rtl: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            slot_duration: DEFAULT_SLOT_DURATION.to_string(),
            snap_duration: None,
            slots: None,
            show_slot_end_time: true,
            show_minor_slot_time: true,
            snap_on_slots: None,
            slot_label_format: None,
            slot_label_interval: None,
            min_time: DEFAULT_MIN_TIME.to_string(),
            max_time: DEFAULT_MAX_TIME.to_string(),
            agenda_event_min_height: 0.0,
            slat_height: 30.0,
            pixels_per_minute: 1.0,
            is_rtl: false,
        }
    }
}

impl GridOptions {
    pub fn label_format(&self) -> &str {
        self.slot_label_format
            .as_ref()
            .and_then(LabelFormatOption::resolve)
            .unwrap_or(DEFAULT_LABEL_FORMAT)
    }

    pub fn min_time(&self) -> Duration {
        duration_or_default(&self.min_time, "minTime", DEFAULT_MIN_TIME, false)
    }

    pub fn max_time(&self) -> Duration {
        let min = self.min_time();
        let max = duration_or_default(&self.max_time, "maxTime", DEFAULT_MAX_TIME, false);
        if max <= min {
            log::warn!(
                "maxTime {} is not after minTime {}, using {}",
                self.max_time,
                self.min_time,
                DEFAULT_MAX_TIME
            );
            return Duration::hours(24).max(min + Duration::hours(1));
        }
        max
    }

    pub fn pixels_per_minute(&self) -> f64 {
        if self.pixels_per_minute.is_finite() && self.pixels_per_minute > 0.0 {
            self.pixels_per_minute
        } else {
            log::warn!("pixelsPerMinute {} is not positive, using 1.0", self.pixels_per_minute);
            1.0
        }
    }

    pub fn slat_height(&self) -> f64 {
        if self.slat_height.is_finite() && self.slat_height > 0.0 {
            self.slat_height
        } else {
            log::warn!("slatHeight {} is not positive, using 30.0", self.slat_height);
            30.0
        }
    }

    pub fn min_event_height(&self) -> f64 {
        self.agenda_event_min_height.max(0.0)
    }
}

/// Parse a duration option, falling back to `default` when the value is
/// malformed or (for `positive`) not strictly positive.
pub(crate) fn duration_or_default(value: &str, name: &str, default: &str, positive: bool) -> Duration {
    match parse_duration(value) {
        Some(duration) if !positive || duration > Duration::zero() => duration,
        _ => {
            log::warn!("invalid {} {:?}, using {}", name, value, default);
            parse_duration(default).unwrap_or_else(Duration::zero)
        }
    }
}
