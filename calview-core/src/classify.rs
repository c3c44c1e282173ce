//! Grouping of a flat event list into per-date buckets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CalViewError, CalViewResult};
use crate::event::CalendarEvent;

/// What to do with an event whose date doesn't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnparseableDates {
    /// Leave the event out of every bucket and record it in `dropped`.
    #[default]
    Drop,
    /// Stop at the first such event with `CalViewError::UnparseableDate`.
    Fail,
}

/// An event left out of the buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub reason: String,
}

/// Events grouped by date, split into full-day and timed.
///
/// Buckets borrow from the caller's list and keep input order.
#[derive(Debug, Default)]
pub struct EventBuckets<'a> {
    pub full_day: BTreeMap<NaiveDate, Vec<&'a CalendarEvent>>,
    pub timed: BTreeMap<NaiveDate, Vec<&'a CalendarEvent>>,
    pub dropped: Vec<DroppedEvent<'a>>,
}

impl<'a> EventBuckets<'a> {
    pub fn full_day_on(&self, date: NaiveDate) -> &[&'a CalendarEvent] {
        self.full_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn timed_on(&self, date: NaiveDate) -> &[&'a CalendarEvent] {
        self.timed.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of events placed in a bucket (dropped events excluded).
    pub fn bucketed_count(&self) -> usize {
        self.full_day.values().chain(self.timed.values()).map(Vec::len).sum()
    }
}

/// Split `events` into full-day and timed buckets keyed by date.
pub fn classify<'a>(
    events: &'a [CalendarEvent],
    policy: UnparseableDates,
) -> CalViewResult<EventBuckets<'a>> {
    let mut buckets = EventBuckets::default();

    for event in events {
        let Some(date) = event.parsed_date() else {
            match policy {
                UnparseableDates::Fail => {
                    return Err(CalViewError::UnparseableDate {
                        id: event.id.clone(),
                        value: event.date.clone(),
                    });
                }
                UnparseableDates::Drop => {
                    warn!(id = %event.id, date = %event.date, "Dropping event with unparseable date");
                    buckets.dropped.push(DroppedEvent {
                        event,
                        reason: format!("Invalid date '{}'. Expected YYYY-MM-DD", event.date),
                    });
                    continue;
                }
            }
        };

        let target = if event.is_full_day() {
            &mut buckets.full_day
        } else {
            &mut buckets.timed
        };
        target.entry(date).or_default().push(event);
    }

    Ok(buckets)
}
