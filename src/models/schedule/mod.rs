// Schedule module
// Time subdivisions of an agenda day: uniform slats or custom slots

use chrono::Duration;
use serde::Serialize;
use serde_json::Value;

use crate::models::settings::{duration_or_default, GridOptions, DEFAULT_SLOT_DURATION};
use crate::models::slot::{Slot, SnapPolicy, TimeOfDay};
use crate::utils::date::{parse_duration, MS_PER_MINUTE};

/// Candidate label intervals, from largest to smallest.
fn stock_label_intervals() -> [Duration; 5] {
    [
        Duration::hours(1),
        Duration::minutes(30),
        Duration::minutes(15),
        Duration::seconds(30),
        Duration::seconds(15),
    ]
}

/// Validated custom slot definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomSlots {
    slots: Vec<Slot>,
    pub snap_on_slots: Option<SnapPolicy>,
    pub show_slot_end_time: bool,
    pub show_minor_slot_time: bool,
}

impl CustomSlots {
    /// Sort and repair `slots`. Returns `None` when no slot is left.
    pub fn new(
        slots: Vec<Slot>,
        snap_on_slots: Option<SnapPolicy>,
        show_slot_end_time: bool,
        show_minor_slot_time: bool,
    ) -> Option<Self> {
        let slots = repair_slots(slots);
        if slots.is_empty() {
            return None;
        }
        Some(Self {
            slots,
            snap_on_slots,
            show_slot_end_time,
            show_minor_slot_time,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `index`, clamped to the last slot.
    pub fn slot_clamped(&self, index: usize) -> &Slot {
        &self.slots[index.min(self.slots.len() - 1)]
    }

    pub fn first_start(&self) -> TimeOfDay {
        self.slots[0].start
    }

    pub fn last_end(&self) -> TimeOfDay {
        self.slots[self.slots.len() - 1].end
    }

    /// Align a time-of-day interval to slot boundaries.
    pub fn snap_range(&self, start: TimeOfDay, end: TimeOfDay, policy: SnapPolicy) -> (TimeOfDay, TimeOfDay) {
        let enlarged_start = self
            .slots
            .iter()
            .rev()
            .find(|slot| slot.start <= start)
            .map(|slot| slot.start)
            .unwrap_or_else(|| self.first_start());
        let enlarged_end = self
            .slots
            .iter()
            .find(|slot| slot.end >= end)
            .map(|slot| slot.end)
            .unwrap_or_else(|| self.last_end());

        match policy {
            SnapPolicy::Enlarge => (enlarged_start, enlarged_end.max(enlarged_start)),
            SnapPolicy::Closest => {
                let snapped_start = self.closest_boundary(start);
                let snapped_end = self.closest_boundary(end);
                if snapped_end > snapped_start {
                    (snapped_start, snapped_end)
                } else {
                    (snapped_start, enlarged_end.max(snapped_start))
                }
            }
        }
    }

    fn closest_boundary(&self, time: TimeOfDay) -> TimeOfDay {
        self.slots
            .iter()
            .flat_map(|slot| [slot.start, slot.end])
            .min_by_key(|boundary| (boundary.as_ms() - time.as_ms()).abs())
            .unwrap_or(time)
    }
}

/// Which kind of rows the grid is made of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlotMode {
    /// Rows every `slot_duration` from `minTime` to `maxTime`.
    Uniform,
    Custom(CustomSlots),
}

/// The time subdivision of one agenda day, fixed for the life of a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSchedule {
    #[serde(serialize_with = "serialize_duration_ms")]
    pub slot_duration: Duration,
    #[serde(serialize_with = "serialize_duration_ms")]
    pub snap_duration: Duration,
    pub snaps_per_slot: i64,
    #[serde(serialize_with = "serialize_duration_ms")]
    pub label_interval: Duration,
    pub label_format: String,
    pub mode: SlotMode,
}

fn serialize_duration_ms<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_milliseconds())
}

impl SlotSchedule {
    /// Uniform schedule with the default label interval and format.
    pub fn uniform(slot_duration: Duration, snap_duration: Option<Duration>) -> Self {
        let (slot_duration, snap_duration, snaps_per_slot) = resolve_snap(slot_duration, snap_duration);
        Self {
            slot_duration,
            snap_duration,
            snaps_per_slot,
            label_interval: compute_label_interval(slot_duration),
            label_format: crate::models::settings::DEFAULT_LABEL_FORMAT.to_string(),
            mode: SlotMode::Uniform,
        }
    }

    /// Build the schedule from raw options. Malformed custom slot entries
    /// are dropped; with no valid slot left the schedule stays uniform.
    pub fn from_options(options: &GridOptions) -> Self {
        let slot_duration = duration_or_default(&options.slot_duration, "slotDuration", DEFAULT_SLOT_DURATION, true);
        let snap_duration = options.snap_duration.as_deref().and_then(|raw| {
            let parsed = parse_duration(raw).filter(|d| *d > Duration::zero());
            if parsed.is_none() {
                log::warn!("invalid snapDuration {:?}, snapping to slotDuration", raw);
            }
            parsed
        });
        let (slot_duration, snap_duration, snaps_per_slot) = resolve_snap(slot_duration, snap_duration);

        let mode = match options.slots.as_ref().and_then(|raw| parse_custom_slots(raw, options)) {
            Some(custom) => SlotMode::Custom(custom),
            None => SlotMode::Uniform,
        };

        let label_interval = match options.slot_label_interval.as_deref() {
            Some(raw) => match parse_duration(raw).filter(|d| *d > Duration::zero()) {
                Some(interval) => interval,
                None => {
                    log::warn!("invalid slotLabelInterval {:?}, computing one", raw);
                    compute_label_interval(slot_duration)
                }
            },
            None => compute_label_interval(slot_duration),
        };

        let schedule = Self {
            slot_duration,
            snap_duration,
            snaps_per_slot,
            label_interval,
            label_format: options.label_format().to_string(),
            mode,
        };
        log::debug!(
            "slot schedule: slot={}ms snap={}ms custom_slots={}",
            schedule.slot_duration.num_milliseconds(),
            schedule.snap_duration.num_milliseconds(),
            schedule.custom().map_or(0, CustomSlots::len)
        );
        schedule
    }

    pub fn custom(&self) -> Option<&CustomSlots> {
        match &self.mode {
            SlotMode::Custom(custom) => Some(custom),
            SlotMode::Uniform => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.custom().is_some()
    }

    /// Snap policy when custom slots are active and snapping to them.
    pub fn slot_snap_policy(&self) -> Option<SnapPolicy> {
        self.custom().and_then(|custom| custom.snap_on_slots)
    }

    /// Number of uniform rows between `min_time` and `max_time`.
    pub fn uniform_row_count(&self, min_time: Duration, max_time: Duration) -> usize {
        let span = (max_time - min_time).num_milliseconds();
        let step = self.slot_duration.num_milliseconds();
        if span <= 0 || step <= 0 {
            return 0;
        }
        ((span + step - 1) / step) as usize
    }

    pub fn snap_minutes(&self) -> f64 {
        self.snap_duration.num_milliseconds() as f64 / MS_PER_MINUTE as f64
    }
}

/// Default snap to the slot duration, and keep snaps-per-slot integral.
fn resolve_snap(slot_duration: Duration, snap_duration: Option<Duration>) -> (Duration, Duration, i64) {
    let snap_duration = snap_duration.unwrap_or(slot_duration);
    let slot_ms = slot_duration.num_milliseconds();
    let snap_ms = snap_duration.num_milliseconds();

    if snap_ms <= 0 || slot_ms % snap_ms != 0 {
        log::warn!(
            "slotDuration {}ms is not a whole multiple of snapDuration {}ms, snapping to whole slots",
            slot_ms,
            snap_ms
        );
        return (slot_duration, slot_duration, 1);
    }

    (slot_duration, snap_duration, slot_ms / snap_ms)
}

fn parse_custom_slots(raw: &Value, options: &GridOptions) -> Option<CustomSlots> {
    let entries = raw.as_array()?;
    let mut slots = Vec::with_capacity(entries.len());
    for entry in entries {
        match Slot::from_raw(entry) {
            Some(slot) => slots.push(slot),
            None => log::warn!("dropping malformed slot definition {}", entry),
        }
    }

    let custom = CustomSlots::new(
        slots,
        options.snap_on_slots.as_ref().and_then(parse_snap_on_slots),
        options.show_slot_end_time,
        options.show_minor_slot_time,
    );
    if custom.is_none() {
        log::warn!("no valid custom slots, using uniform slots");
    }
    custom
}

/// `true` enables slot snapping with the default policy; an object carrying
/// a `snapPolicy` key enables it with that policy.
pub fn parse_snap_on_slots(raw: &Value) -> Option<SnapPolicy> {
    match raw {
        Value::Bool(true) => Some(SnapPolicy::Enlarge),
        Value::Object(object) => {
            let policy = object.get("snapPolicy")?;
            if policy.as_str() == Some("closest") {
                Some(SnapPolicy::Closest)
            } else {
                Some(SnapPolicy::Enlarge)
            }
        }
        _ => None,
    }
}

/// Sort slots by start and make each one end no earlier than it starts
/// and no later than the next one starts.
pub fn repair_slots(mut slots: Vec<Slot>) -> Vec<Slot> {
    slots.sort_by_key(|slot| slot.start);

    for i in 0..slots.len() {
        let original_end = slots[i].end;
        if original_end < slots[i].start {
            slots[i].end = slots[i].start;
        }
        if let Some(next_start) = slots.get(i + 1).map(|next| next.start) {
            if next_start < original_end {
                slots[i].end = next_start;
            }
        }
    }

    slots
}

/// Automatic label interval: the smallest stock interval holding a whole
/// number (more than one) of slots, else the slot duration itself.
pub fn compute_label_interval(slot_duration: Duration) -> Duration {
    let slot_ms = slot_duration.num_milliseconds();
    if slot_ms <= 0 {
        return slot_duration;
    }

    stock_label_intervals()
        .into_iter()
        .rev()
        .find(|interval| {
            let interval_ms = interval.num_milliseconds();
            interval_ms % slot_ms == 0 && interval_ms / slot_ms > 1
        })
        .unwrap_or(slot_duration)
}
