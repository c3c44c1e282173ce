//! Calendar event types.
//!
//! Events are owned by the embedding application and arrive as a flat list on
//! every render. The field names on the wire follow what the application sends
//! (`from_time`, `isFullDay`, `resizeEdge`, ...). Fields this crate does not
//! know about are kept in `extra` so they survive a round trip through the
//! update callback.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time;

/// Date format used for event dates and bucket keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar event as passed in by the embedding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Anchor date, `YYYY-MM-DD`. A trailing `T...` part is ignored.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_time: Option<String>,
    #[serde(rename = "isFullDay", default, skip_serializing_if = "Option::is_none")]
    pub is_full_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Application-defined event type, used to pick an icon
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "isResizing", default, skip_serializing_if = "Option::is_none")]
    pub is_resizing: Option<bool>,
    #[serde(rename = "resizeEdge", default, skip_serializing_if = "Option::is_none")]
    pub resize_edge: Option<ResizeEdge>,

    /// Fields the application attached that calview does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            from_time: None,
            to_time: None,
            is_full_day: None,
            color: None,
            event_type: None,
            is_resizing: None,
            resize_edge: None,
            extra: Map::new(),
        }
    }

    pub fn with_times(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_time = Some(from.into());
        self.to_time = Some(to.into());
        self
    }

    pub fn full_day(mut self) -> Self {
        self.is_full_day = Some(true);
        self.from_time = None;
        self.to_time = None;
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color.as_str().to_string());
        self
    }

    pub fn is_full_day(&self) -> bool {
        self.is_full_day.unwrap_or(false)
    }

    /// Parse the event's date, ignoring any time suffix after `T`.
    /// Returns None for dates that don't parse.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_key(&self.date)
    }

    /// Whether the start/end pair is ordered. Events missing either edge are
    /// considered valid.
    pub fn has_valid_range(&self) -> bool {
        match (&self.from_time, &self.to_time) {
            (Some(from), Some(to)) => time::is_valid_range(from, to),
            _ => true,
        }
    }

    /// The display color, falling back to green for missing or unknown tags.
    pub fn display_color(&self) -> EventColor {
        self.color
            .as_deref()
            .and_then(EventColor::from_tag)
            .unwrap_or_default()
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "New Event")
        } else {
            write!(f, "{}", self.title)
        }
    }
}

/// Normalize a date string to a date, accepting `YYYY-MM-DD` with an optional
/// `T...` suffix.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let day = value.split('T').next()?.trim();
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Format a date as a bucket key (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Which view a calendar is showing, or which view a drag started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[serde(alias = "Day")]
    Day,
    #[serde(alias = "Week")]
    Week,
    #[serde(alias = "Month")]
    Month,
}

impl ViewKind {
    /// Tab order used by the container.
    pub const ALL: [ViewKind; 3] = [ViewKind::Day, ViewKind::Week, ViewKind::Month];

    /// Week and day views lay events out on an hour grid.
    pub fn is_timed(self) -> bool {
        matches!(self, ViewKind::Day | ViewKind::Week)
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Day => "Day",
            ViewKind::Week => "Week",
            ViewKind::Month => "Month",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Day => write!(f, "day"),
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ViewKind::Day),
            "week" => Ok(ViewKind::Week),
            "month" => Ok(ViewKind::Month),
            other => Err(format!("Unknown view '{}'. Expected month, week or day", other)),
        }
    }
}

/// Which edge of a timed event a resize handle adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    Start,
    End,
}

impl std::str::FromStr for ResizeEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ResizeEdge::Start),
            "end" => Ok(ResizeEdge::End),
            other => Err(format!("Unknown resize edge '{}'. Expected start or end", other)),
        }
    }
}

/// Color tags understood by the styling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Blue,
    #[default]
    Green,
    Red,
    Yellow,
    Gray,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Red,
        EventColor::Yellow,
        EventColor::Gray,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        EventColor::ALL.into_iter().find(|c| c.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Red => "red",
            EventColor::Yellow => "yellow",
            EventColor::Gray => "gray",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_names_and_keep_unknown_fields() {
        let json = r#"{
            "id": "1",
            "title": "Standup",
            "date": "2025-04-13",
            "from_time": "09:00",
            "to_time": "09:15",
            "isFullDay": false,
            "color": "blue",
            "type": "meeting",
            "venue": "Room 4"
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.from_time.as_deref(), Some("09:00"));
        assert_eq!(event.is_full_day, Some(false));
        assert_eq!(event.event_type.as_deref(), Some("meeting"));
        assert_eq!(event.extra.get("venue"), Some(&Value::from("Room 4")));

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["venue"], "Room 4");
        assert_eq!(back["isFullDay"], false);
    }

    #[test]
    fn test_cleared_times_are_omitted_on_the_wire() {
        let event = CalendarEvent::new("1", "Offsite", "2025-04-13");
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("from_time").is_none());
        assert!(value.get("to_time").is_none());
    }

    #[test]
    fn test_parse_date_key_ignores_time_suffix() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 13);
        assert_eq!(parse_date_key("2025-04-13"), expected);
        assert_eq!(parse_date_key("2025-04-13T10:30:00.000Z"), expected);
        assert_eq!(parse_date_key("13/04/2025"), None);
        assert_eq!(parse_date_key(""), None);
    }

    #[test]
    fn test_view_kind_accepts_capitalized_names() {
        let kind: ViewKind = serde_json::from_str("\"Week\"").unwrap();
        assert_eq!(kind, ViewKind::Week);
        let kind: ViewKind = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(kind, ViewKind::Month);
        assert_eq!("DAY".parse::<ViewKind>(), Ok(ViewKind::Day));
    }

    #[test]
    fn test_display_color_falls_back_to_green() {
        let mut event = CalendarEvent::new("1", "", "2025-04-13");
        assert_eq!(event.display_color(), EventColor::Green);
        event.color = Some("purple".into());
        assert_eq!(event.display_color(), EventColor::Green);
        event.color = Some("red".into());
        assert_eq!(event.display_color(), EventColor::Red);
        assert_eq!(event.to_string(), "New Event");
    }
}
