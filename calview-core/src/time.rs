//! Clock-time helpers.
//!
//! Event times travel as `HH:MM` strings. Because the format is fixed-width,
//! plain string comparison orders them correctly; parsing is only needed when
//! times are shifted or laid out on the hour grid.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Format used for event times on the wire.
pub const CLOCK_FORMAT: &str = "%H:%M";

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// How hour labels and durations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl std::str::FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12h" => Ok(TimeFormat::TwelveHour),
            "24h" => Ok(TimeFormat::TwentyFourHour),
            other => Err(format!("Unknown time format '{}'. Expected 12h or 24h", other)),
        }
    }
}

/// Parse `HH:MM` (or `HH:MM:SS`, seconds ignored) into a time.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(|t| t.with_second(0))
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Drop a trailing seconds component: `10:30:00` becomes `10:30`.
pub fn strip_seconds(value: &str) -> String {
    value.split(':').take(2).collect::<Vec<_>>().join(":")
}

/// A range is valid when the start is not after the end.
pub fn is_valid_range(from: &str, to: &str) -> bool {
    from <= to
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Shift a time by `minutes`, saturating at 00:00 and 23:59 instead of
/// wrapping into another day.
pub fn add_minutes_clamped(time: NaiveTime, minutes: i64) -> NaiveTime {
    let total = (minutes_since_midnight(time) + minutes).clamp(0, MINUTES_PER_DAY - 1);
    NaiveTime::from_hms_opt((total / 60) as u32, (total % 60) as u32, 0).unwrap_or(time)
}

/// Value carried by the drop target of an hour row, e.g. `09:00`.
pub fn hour_slot(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// The 24 hour-row labels for the given format.
pub fn hour_labels(format: TimeFormat) -> Vec<String> {
    (0..24)
        .map(|hour| match format {
            TimeFormat::TwentyFourHour => hour_slot(hour),
            TimeFormat::TwelveHour => {
                let suffix = if hour < 12 { "AM" } else { "PM" };
                let h = if hour % 12 == 0 { 12 } else { hour % 12 };
                format!("{} {}", h, suffix)
            }
        })
        .collect()
}

/// Write a single clock time in the requested format.
pub fn format_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => format_clock(time),
        TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
    }
}

/// `from - to` text shown under an event title. None if either edge is empty.
/// Times that don't parse are shown as given.
pub fn format_duration(from: &str, to: &str, format: TimeFormat) -> Option<String> {
    if from.is_empty() || to.is_empty() {
        return None;
    }

    let render = |value: &str| match parse_clock(value) {
        Some(t) => format_time(t, format),
        None => value.to_string(),
    };

    Some(format!("{} - {}", render(from), render(to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_accepts_seconds() {
        assert_eq!(parse_clock("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_clock("09:30:45"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_clock("9am"), None);
        assert_eq!(parse_clock("24:00"), None);
    }

    #[test]
    fn test_strip_seconds() {
        assert_eq!(strip_seconds("10:30:00"), "10:30");
        assert_eq!(strip_seconds("10:30"), "10:30");
        assert_eq!(strip_seconds(""), "");
    }

    #[test]
    fn test_add_minutes_clamped_stays_within_the_day() {
        let t = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert_eq!(format_clock(add_minutes_clamped(t, 60)), "23:59");
        let t = NaiveTime::from_hms_opt(0, 15, 0).unwrap();
        assert_eq!(format_clock(add_minutes_clamped(t, -60)), "00:00");
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(format_clock(add_minutes_clamped(t, 60)), "10:00");
    }

    #[test]
    fn test_hour_labels() {
        let twelve = hour_labels(TimeFormat::TwelveHour);
        assert_eq!(twelve.len(), 24);
        assert_eq!(twelve[0], "12 AM");
        assert_eq!(twelve[1], "1 AM");
        assert_eq!(twelve[12], "12 PM");
        assert_eq!(twelve[23], "11 PM");

        let full = hour_labels(TimeFormat::TwentyFourHour);
        assert_eq!(full[0], "00:00");
        assert_eq!(full[23], "23:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(
            format_duration("09:00", "10:30", TimeFormat::TwentyFourHour).as_deref(),
            Some("09:00 - 10:30")
        );
        assert_eq!(
            format_duration("13:00", "14:15", TimeFormat::TwelveHour).as_deref(),
            Some("1:00 PM - 2:15 PM")
        );
        assert_eq!(format_duration("", "10:00", TimeFormat::TwelveHour), None);
    }

    #[test]
    fn test_is_valid_range_is_lexicographic() {
        assert!(is_valid_range("09:00", "10:00"));
        assert!(is_valid_range("09:00", "09:00"));
        assert!(!is_valid_range("14:00", "09:30"));
    }
}
