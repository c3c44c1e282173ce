//! View models for the month, week and day layouts.
//!
//! Views are rebuilt from the event buckets on every render and hold no
//! state of their own. Each cell, lane and hour row carries the
//! [`DropTarget`] it reports when something is dropped on it.

mod day;
mod month;
mod week;

pub use day::{DayView, day_view};
pub use month::{CellEvents, MonthCell, MonthView, month_view};
pub use week::{WeekView, week_view};

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::classify::EventBuckets;
use crate::config::CalendarConfig;
use crate::dnd::DropTarget;
use crate::event::{CalendarEvent, ViewKind};
use crate::time::{format_duration, hour_slot, minutes_since_midnight, parse_clock};

/// Shortest height an event is drawn with, in minutes.
pub const MIN_EVENT_MINUTES: i64 = 15;

/// Assumed length of an event with no usable end time, in minutes.
pub const FALLBACK_EVENT_MINUTES: i64 = 60;

/// A timed event positioned on the hour grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent<'a> {
    pub event: &'a CalendarEvent,
    /// 1-based grid row of the starting hour
    pub row: u32,
    /// Offset from the top of the column in pixels, including the full-day lane
    pub top: f32,
    pub height: f32,
    /// `from - to` text, if both edges are set
    pub duration: Option<String>,
}

/// One date's column on an hour grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Full-day events, then timed-bucket events without a usable start time
    pub full_day: Vec<&'a CalendarEvent>,
    pub timed: Vec<PlacedEvent<'a>>,
    pub lane_target: DropTarget,
    /// One target per hour, carrying `HH:00`
    pub slots: Vec<DropTarget>,
}

impl<'a> DayColumn<'a> {
    pub(crate) fn build(
        view: ViewKind,
        date: NaiveDate,
        today: NaiveDate,
        buckets: &EventBuckets<'a>,
        config: &CalendarConfig,
    ) -> Self {
        let mut full_day: Vec<&'a CalendarEvent> = buckets.full_day_on(date).to_vec();
        let mut timed = Vec::new();

        for &event in buckets.timed_on(date) {
            match place_event(event, config) {
                Some(placed) => timed.push(placed),
                None => full_day.push(event),
            }
        }

        DayColumn {
            date,
            is_today: date == today,
            full_day,
            timed,
            lane_target: DropTarget::cell(view, date),
            slots: (0..24).map(|h| DropTarget::slot(view, date, hour_slot(h))).collect(),
        }
    }
}

/// Position a timed event. None when its start time is missing or unparseable.
pub fn place_event<'a>(event: &'a CalendarEvent, config: &CalendarConfig) -> Option<PlacedEvent<'a>> {
    let start = event.from_time.as_deref().and_then(parse_clock)?;
    let start_minutes = minutes_since_midnight(start);

    let minutes = match event.to_time.as_deref().and_then(parse_clock) {
        Some(end) => (minutes_since_midnight(end) - start_minutes).max(MIN_EVENT_MINUTES),
        None => FALLBACK_EVENT_MINUTES,
    };

    let minute_height = config.minute_height();
    let duration = match (&event.from_time, &event.to_time) {
        (Some(from), Some(to)) if !event.is_full_day() => {
            format_duration(from, to, config.time_format)
        }
        _ => None,
    };

    Some(PlacedEvent {
        event,
        row: start.hour() + 1,
        top: start_minutes as f32 * minute_height + config.redundant_cell_height,
        height: minutes as f32 * minute_height,
        duration,
    })
}

/// Offset of the current-time line, shown only in today's column.
pub fn time_marker_offset(date: NaiveDate, now: NaiveDateTime, config: &CalendarConfig) -> Option<f32> {
    if date != now.date() {
        return None;
    }
    let minutes = minutes_since_midnight(now.time());
    Some(minutes as f32 * config.minute_height() + config.redundant_cell_height)
}

/// Initial scroll position of the hour grid: the top of the current hour
/// when today is on screen, otherwise the configured `scroll_to_hour`.
pub fn initial_scroll(shows_today: bool, now: NaiveDateTime, config: &CalendarConfig) -> f32 {
    let hour = if shows_today { now.hour() } else { config.scroll_to_hour };
    hour as f32 * config.hour_height
}
