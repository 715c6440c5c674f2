//! Wall-clock `HH:mm` handling.
//!
//! Shift and availability times travel as 24-hour `HH:mm` strings. This
//! module parses them strictly and provides the serde adapters the models
//! use, plus the minute arithmetic every time-based rule relies on.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;

/// Minutes in a day; added to the end of a shift that crosses midnight.
pub const MINUTES_PER_DAY: i64 = 1440;

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid HH:mm pattern"));

/// Parses a strict 24-hour `HH:mm` string.
///
/// Single-digit hours, seconds, and out-of-range values are rejected.
///
/// # Example
///
/// ```
/// use schedule_engine::models::parse_clock_time;
///
/// assert!(parse_clock_time("06:30").is_some());
/// assert!(parse_clock_time("6:30").is_none());
/// assert!(parse_clock_time("24:00").is_none());
/// ```
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let captures = CLOCK_TIME.captures(value)?;
    let hour = captures[1].parse().ok()?;
    let minute = captures[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Minutes since midnight.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Length of a shift in minutes.
///
/// An end at or before the start means the shift crosses midnight, so a
/// full day is added to the end.
///
/// # Example
///
/// ```
/// use schedule_engine::models::{parse_clock_time, shift_duration_minutes};
///
/// let start = parse_clock_time("22:00").unwrap();
/// let end = parse_clock_time("06:00").unwrap();
/// assert_eq!(shift_duration_minutes(start, end), 480);
/// ```
pub fn shift_duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = minutes_of_day(start);
    let mut end = minutes_of_day(end);
    if end <= start {
        end += MINUTES_PER_DAY;
    }
    end - start
}

/// Formats a time back to `HH:mm`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for `NaiveTime` as `HH:mm`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes as `HH:mm`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    /// Deserializes a strict `HH:mm` string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("'{}' is not a 24-hour HH:mm time", raw)))
    }
}

/// Serde adapter for `Option<NaiveTime>` as `HH:mm` or null.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes as `HH:mm` or null.
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&super::format_clock_time(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional strict `HH:mm` string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_clock_time(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("'{}' is not a 24-hour HH:mm time", raw))),
            None => Ok(None),
        }
    }
}
