// Date utility functions
// Unzoned millisecond arithmetic shared by the grid

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Milliseconds since the epoch for midnight of `date`.
pub fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Midnight of the day containing `ms`.
pub fn start_of_day_ms(ms: i64) -> i64 {
    ms - ms.rem_euclid(MS_PER_DAY)
}

pub fn is_same_day(ms1: i64, ms2: i64) -> bool {
    start_of_day_ms(ms1) == start_of_day_ms(ms2)
}

pub fn ms_to_naive(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

pub fn ms_to_date(ms: i64) -> Option<NaiveDate> {
    ms_to_naive(ms).map(|dt| dt.date())
}

/// Parses a `[-]H:mm[:ss]` duration string. Hours are unbounded so that
/// values such as `24:00` or `30:00` can describe a grid that runs past
/// midnight.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    if parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let hours: i64 = parts[0].parse().ok()?;
    let minutes: i64 = parts[1].parse().ok()?;
    let seconds: i64 = match parts.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if minutes > 59 || seconds > 59 {
        return None;
    }

    let total = Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds);
    Some(if negative { -total } else { total })
}

/// Formats a time-of-day offset with a chrono format string. Offsets past
/// midnight wrap onto the next day's clock.
pub fn format_time_of_day(offset: Duration, format: &str) -> String {
    let wrapped = offset.num_milliseconds().rem_euclid(MS_PER_DAY);
    let time = NaiveTime::MIN + Duration::milliseconds(wrapped);
    time.format(format).to_string()
}

/// Formats the end of a time span. `24:00` is the end of the same day, not
/// the next midnight, and shows as the day's last minute.
pub fn format_end_time_of_day(offset: Duration, format: &str) -> String {
    if offset.num_milliseconds() == MS_PER_DAY {
        return format_time_of_day(Duration::milliseconds(MS_PER_DAY - 1), format);
    }
    format_time_of_day(offset, format)
}
