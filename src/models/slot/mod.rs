// Slot module
// Custom time-of-day slots for agenda grids

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::date::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// Wall-clock offset from the start of a day, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(i64);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_ms(ms: i64) -> Self {
        Self(ms)
    }

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(
            hours as i64 * MS_PER_HOUR
                + minutes as i64 * MS_PER_MINUTE
                + seconds as i64 * MS_PER_SECOND,
        )
    }

    /// Parse an `H:mm[:ss]` value (one or two digit hour). `24:00[:00]` is
    /// accepted as the end of the day.
    pub fn parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return None;
        }
        let is_field = |p: &&str| !p.is_empty() && p.len() <= 2 && p.bytes().all(|b| b.is_ascii_digit());
        if !parts.iter().all(is_field) {
            return None;
        }

        let hours: u32 = parts[0].parse().ok()?;
        let minutes: u32 = parts[1].parse().ok()?;
        let seconds: u32 = match parts.get(2) {
            Some(s) => s.parse().ok()?,
            None => 0,
        };

        if minutes > 59 || seconds > 59 || hours > 24 {
            return None;
        }
        if hours == 24 && (minutes > 0 || seconds > 0) {
            return None;
        }

        Some(Self::from_hms(hours, minutes, seconds))
    }

    pub fn as_ms(&self) -> i64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::milliseconds(self.0)
    }

    pub fn as_minutes(&self) -> f64 {
        self.0 as f64 / MS_PER_MINUTE as f64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.0 / MS_PER_SECOND;
        let (h, m, s) = (total_seconds / 3600, (total_seconds / 60) % 60, total_seconds % 60);
        if s == 0 {
            write!(f, "{:02}:{:02}", h, m)
        } else {
            write!(f, "{:02}:{:02}:{:02}", h, m, s)
        }
    }
}

/// How drops and selections are aligned when snapping to whole slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapPolicy {
    /// Widen to the slots containing each edge.
    #[default]
    Enlarge,
    /// Move each edge to the nearest slot boundary.
    Closest,
}

/// One named interval of a custom slot schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub minor: bool,
    pub class_names: Vec<String>,
}

impl Slot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            minor: false,
            class_names: Vec::new(),
        }
    }

    pub fn minor(mut self, minor: bool) -> Self {
        self.minor = minor;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    pub fn duration_ms(&self) -> i64 {
        self.end.as_ms() - self.start.as_ms()
    }

    /// Build a slot from a raw configuration entry. Entries without string
    /// `start`/`end` values in `H:mm[:ss]` form yield `None`.
    ///
    /// `minor` is only set by a literal `true`; `className` may be a string
    /// or a list in which non-string members are ignored.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let start = TimeOfDay::parse(object.get("start")?.as_str()?)?;
        let end = TimeOfDay::parse(object.get("end")?.as_str()?)?;

        let minor = matches!(object.get("minor"), Some(Value::Bool(true)));

        let class_names = match object.get("className") {
            Some(Value::String(name)) => vec![name.clone()],
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            start,
            end,
            minor,
            class_names,
        })
    }
}
