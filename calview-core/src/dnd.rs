//! Drag-and-drop event model.
//!
//! A drag carries a copy of the event plus the view it started in. When it is
//! dropped on a cell, the cell's date and optional time decide the proposed new
//! event. The original event is never modified; the proposal goes to the
//! owner through the update callback and the owner decides whether to keep it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{CalendarEvent, ResizeEdge, ViewKind, date_key};
use crate::time::{add_minutes_clamped, format_clock, minutes_since_midnight, parse_clock};

/// What the user grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "edge")]
pub enum DragSubject {
    /// The event body: moves date and/or start time.
    Move,
    /// A resize handle: adjusts one edge of a timed event.
    Resize(ResizeEdge),
}

/// Payload attached to a drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragItem {
    pub event: CalendarEvent,
    pub source_view: ViewKind,
    pub subject: DragSubject,
}

impl DragItem {
    pub fn moving(event: CalendarEvent, source_view: ViewKind) -> Self {
        DragItem {
            event,
            source_view,
            subject: DragSubject::Move,
        }
    }

    /// A resize-handle drag. The carried event is flagged as resizing so the
    /// drag preview can render it differently.
    pub fn resizing(mut event: CalendarEvent, edge: ResizeEdge, source_view: ViewKind) -> Self {
        event.is_resizing = Some(true);
        event.resize_edge = Some(edge);
        DragItem {
            event,
            source_view,
            subject: DragSubject::Resize(edge),
        }
    }
}

/// A grid cell that accepts drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub view: ViewKind,
    pub date: NaiveDate,
    /// `HH:MM` for hour rows; None for month cells and full-day lanes.
    pub time: Option<String>,
}

impl DropTarget {
    pub fn cell(view: ViewKind, date: NaiveDate) -> Self {
        DropTarget {
            view,
            date,
            time: None,
        }
    }

    pub fn slot(view: ViewKind, date: NaiveDate, time: impl Into<String>) -> Self {
        DropTarget {
            view,
            date,
            time: Some(time.into()),
        }
    }

    /// Accept a drop: compute the proposed event and the drop result.
    pub fn accept(&self, item: &DragItem, options: &DropOptions) -> DropOutcome {
        DropOutcome {
            event: apply_drop(item, self, options),
            result: DropResult {
                date: self.date,
                time: self.time.clone(),
                source_view: item.source_view,
            },
        }
    }
}

/// Where a drop landed and where the drag came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub date: NaiveDate,
    pub time: Option<String>,
    pub source_view: ViewKind,
}

/// Proposed event plus the drop result it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub event: CalendarEvent,
    pub result: DropResult,
}

/// How a plain move treats the end time when the start changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTiming {
    /// Only `from_time` follows the drop; `to_time` stays as it was.
    #[default]
    KeepEnd,
    /// `to_time` shifts by the same amount, keeping the duration.
    PreserveDuration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropOptions {
    pub move_timing: MoveTiming,
    /// Start of the window given to events moved from the month grid onto
    /// an hour grid without a drop time.
    pub default_start: NaiveTime,
    /// Length of that window in minutes.
    pub default_minutes: i64,
}

impl Default for DropOptions {
    fn default() -> Self {
        DropOptions {
            move_timing: MoveTiming::KeepEnd,
            default_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            default_minutes: 60,
        }
    }
}

/// Compute the event that results from dropping `item` on `target`.
pub fn apply_drop(item: &DragItem, target: &DropTarget, options: &DropOptions) -> CalendarEvent {
    let mut updated = match item.subject {
        DragSubject::Move => move_event(&item.event, item.source_view, target, options),
        DragSubject::Resize(edge) => resize_event(&item.event, edge, target),
    };

    updated.is_resizing = None;
    updated.resize_edge = None;

    debug!(
        id = %updated.id,
        from = %item.source_view,
        to = %target.view,
        date = %updated.date,
        from_time = ?updated.from_time,
        to_time = ?updated.to_time,
        "Computed drop"
    );

    updated
}

fn move_event(
    event: &CalendarEvent,
    source: ViewKind,
    target: &DropTarget,
    options: &DropOptions,
) -> CalendarEvent {
    let mut updated = event.clone();
    updated.date = date_key(target.date);

    match (source.is_timed(), target.view.is_timed()) {
        (false, true) => give_window(&mut updated, target.time.as_deref(), options),
        (true, false) => {
            updated.from_time = None;
            updated.to_time = None;
        }
        (true, true) if event.is_full_day() => {
            // Lane to lane keeps it full-day; onto an hour row it becomes timed
            if let Some(time) = target.time.as_deref() {
                give_window(&mut updated, Some(time), options);
            }
        }
        _ => {
            if let Some(time) = &target.time {
                shift_start(&mut updated, time, options.move_timing);
            }
        }
    }

    updated
}

/// Give an event a fresh window starting at `time`, or at the default start.
/// A full-day event stops being full-day once it has times.
fn give_window(event: &mut CalendarEvent, time: Option<&str>, options: &DropOptions) {
    let start = time.and_then(parse_clock).unwrap_or(options.default_start);
    let end = add_minutes_clamped(start, options.default_minutes);
    event.from_time = Some(format_clock(start));
    event.to_time = Some(format_clock(end));
    if event.is_full_day() {
        event.is_full_day = Some(false);
    }
}

fn shift_start(event: &mut CalendarEvent, new_start: &str, timing: MoveTiming) {
    if timing == MoveTiming::PreserveDuration {
        let old_start = event.from_time.as_deref().and_then(parse_clock);
        let old_end = event.to_time.as_deref().and_then(parse_clock);
        if let (Some(old_start), Some(old_end), Some(start)) =
            (old_start, old_end, parse_clock(new_start))
        {
            let delta = minutes_since_midnight(start) - minutes_since_midnight(old_start);
            event.to_time = Some(format_clock(add_minutes_clamped(old_end, delta)));
        }
    }

    event.from_time = Some(new_start.to_string());
}

/// Resize drops take the target's date, so a handle dragged onto another
/// week column moves the event there. Without a drop time the times stay.
fn resize_event(event: &CalendarEvent, edge: ResizeEdge, target: &DropTarget) -> CalendarEvent {
    let mut updated = event.clone();
    updated.date = date_key(target.date);
    let Some(time) = target.time.as_deref() else {
        return updated;
    };

    match edge {
        ResizeEdge::Start => {
            if updated.to_time.as_deref().is_some_and(|end| time > end) {
                updated.to_time = Some(time.to_string());
            }
            updated.from_time = Some(time.to_string());
        }
        ResizeEdge::End => {
            if updated.from_time.as_deref().is_some_and(|start| time < start) {
                updated.from_time = Some(time.to_string());
            }
            updated.to_time = Some(time.to_string());
        }
    }

    updated
}
