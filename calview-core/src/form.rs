//! Event editor form: validation and submission of a new or edited event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::event::{CalendarEvent, EventColor, date_key, parse_date_key};
use crate::time::{minutes_since_midnight, parse_clock, strip_seconds};

/// Validation failures, worded for display next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Date is required")]
    DateRequired,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start Time is required")]
    StartTimeRequired,

    #[error("End Time is required")]
    EndTimeRequired,

    #[error("Invalid time '{0}'")]
    InvalidTime(String),

    #[error("Start time must be less than End Time")]
    StartNotBeforeEnd,
}

/// What the form's fields hold while the user edits them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub participant: String,
    pub venue: String,
    pub from_time: String,
    pub to_time: String,
    pub color: EventColor,
    pub is_full_day: bool,
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Nothing changed; just close the form.
    Unchanged,
    Create(CalendarEvent),
    Update(CalendarEvent),
}

impl EventDraft {
    /// A blank draft on `date`, as opened by double-clicking a cell.
    pub fn for_date(date: NaiveDate) -> Self {
        EventDraft {
            date: date_key(date),
            ..EventDraft::default()
        }
    }

    pub fn from_event(event: &CalendarEvent) -> Self {
        let text = |key: &str| {
            event
                .extra
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        EventDraft {
            title: event.title.clone(),
            date: event.date.clone(),
            participant: text("participant"),
            venue: text("venue"),
            from_time: event.from_time.clone().unwrap_or_default(),
            to_time: event.to_time.clone().unwrap_or_default(),
            color: event.display_color(),
            is_full_day: event.is_full_day(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.date.trim().is_empty() {
            return Err(FormError::DateRequired);
        }
        if parse_date_key(&self.date).is_none() {
            return Err(FormError::InvalidDate(self.date.clone()));
        }
        if self.is_full_day {
            return Ok(());
        }
        if self.from_time.is_empty() {
            return Err(FormError::StartTimeRequired);
        }
        if self.to_time.is_empty() {
            return Err(FormError::EndTimeRequired);
        }

        let from = parse_clock(&self.from_time)
            .ok_or_else(|| FormError::InvalidTime(self.from_time.clone()))?;
        let to = parse_clock(&self.to_time)
            .ok_or_else(|| FormError::InvalidTime(self.to_time.clone()))?;

        if minutes_since_midnight(to) - minutes_since_midnight(from) <= 0 {
            return Err(FormError::StartNotBeforeEnd);
        }

        Ok(())
    }

    /// Full-day drafts lose their times; otherwise seconds are stripped.
    pub fn normalized(&self) -> Self {
        let mut draft = self.clone();
        if draft.is_full_day {
            draft.from_time.clear();
            draft.to_time.clear();
        } else {
            draft.from_time = strip_seconds(&draft.from_time);
            draft.to_time = strip_seconds(&draft.to_time);
        }
        draft
    }

    /// Validate and turn the draft into an event for the owner.
    ///
    /// `existing` is the event being edited, if any. Unknown fields on it are
    /// carried over to the updated event.
    pub fn submit(&self, existing: Option<&CalendarEvent>) -> Result<Submission, FormError> {
        self.validate()?;

        let draft = self.normalized();
        let baseline = existing.map(EventDraft::from_event).unwrap_or_default();
        if draft == baseline {
            return Ok(Submission::Unchanged);
        }

        let mut event = match existing {
            Some(event) => event.clone(),
            None => CalendarEvent::new(new_event_id(), "", ""),
        };
        draft.apply_to(&mut event);

        Ok(match existing {
            Some(_) => Submission::Update(event),
            None => Submission::Create(event),
        })
    }

    fn apply_to(&self, event: &mut CalendarEvent) {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());

        event.title = self.title.clone();
        event.date = self.date.clone();
        event.from_time = optional(&self.from_time);
        event.to_time = optional(&self.to_time);
        event.is_full_day = Some(self.is_full_day);
        event.color = Some(self.color.as_str().to_string());

        for (key, value) in [("participant", &self.participant), ("venue", &self.venue)] {
            if value.is_empty() {
                event.extra.remove(key);
            } else {
                event.extra.insert(key.to_string(), Value::from(value.as_str()));
            }
        }
    }
}

/// Id for an event created in the editor, e.g. `#3f9a1c0b`.
pub fn new_event_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("#{}", &uuid[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Planning".into(),
            date: "2025-04-13".into(),
            from_time: "10:00".into(),
            to_time: "11:00".into(),
            ..EventDraft::default()
        }
    }

    #[test]
    fn test_validate_required_fields_in_order() {
        let mut d = EventDraft::default();
        assert_eq!(d.validate(), Err(FormError::DateRequired));

        d.date = "2025-04-13".into();
        assert_eq!(d.validate(), Err(FormError::StartTimeRequired));

        d.from_time = "10:00".into();
        assert_eq!(d.validate(), Err(FormError::EndTimeRequired));

        d.to_time = "10:00".into();
        assert_eq!(d.validate(), Err(FormError::StartNotBeforeEnd));

        d.to_time = "10:30".into();
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_full_day_needs_no_times() {
        let d = EventDraft {
            date: "2025-04-13".into(),
            is_full_day: true,
            ..EventDraft::default()
        };
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_date_is_reported() {
        let d = EventDraft {
            date: "garbage".into(),
            ..draft()
        };
        assert_eq!(d.validate(), Err(FormError::InvalidDate("garbage".into())));
        assert_eq!(d.submit(None), Err(FormError::InvalidDate("garbage".into())));

        let full_day = EventDraft {
            is_full_day: true,
            ..d
        };
        assert_eq!(full_day.validate(), Err(FormError::InvalidDate("garbage".into())));
    }

    #[test]
    fn test_invalid_time_is_reported() {
        let d = EventDraft {
            to_time: "late".into(),
            ..draft()
        };
        assert_eq!(d.validate(), Err(FormError::InvalidTime("late".into())));
    }

    #[test]
    fn test_normalized_strips_seconds_and_full_day_times() {
        let d = EventDraft {
            from_time: "10:00:00".into(),
            to_time: "11:15:30".into(),
            ..draft()
        };
        let n = d.normalized();
        assert_eq!(n.from_time, "10:00");
        assert_eq!(n.to_time, "11:15");

        let full = EventDraft {
            is_full_day: true,
            ..draft()
        };
        let n = full.normalized();
        assert!(n.from_time.is_empty());
        assert!(n.to_time.is_empty());
    }

    #[test]
    fn test_submit_new_event_gets_an_id() {
        let Ok(Submission::Create(event)) = draft().submit(None) else {
            panic!("Expected Create");
        };

        assert!(event.id.starts_with('#'));
        assert_eq!(event.id.len(), 9);
        assert_eq!(event.title, "Planning");
        assert_eq!(event.from_time.as_deref(), Some("10:00"));
        assert_eq!(event.color.as_deref(), Some("green"));
        assert_eq!(event.is_full_day, Some(false));
    }

    #[test]
    fn test_submit_unchanged_existing_event() {
        let existing = CalendarEvent::new("7", "Planning", "2025-04-13").with_times("10:00", "11:00");
        let d = EventDraft {
            from_time: "10:00:00".into(),
            ..EventDraft::from_event(&existing)
        };

        assert_eq!(d.submit(Some(&existing)), Ok(Submission::Unchanged));
    }

    #[test]
    fn test_submit_update_keeps_id_and_extra_fields() {
        let mut existing =
            CalendarEvent::new("7", "Planning", "2025-04-13").with_times("10:00", "11:00");
        existing.extra.insert("owner".into(), Value::from("sam"));

        let d = EventDraft {
            venue: "Room 4".into(),
            to_time: "12:00".into(),
            ..EventDraft::from_event(&existing)
        };

        let Ok(Submission::Update(updated)) = d.submit(Some(&existing)) else {
            panic!("Expected Update");
        };
        assert_eq!(updated.id, "7");
        assert_eq!(updated.to_time.as_deref(), Some("12:00"));
        assert_eq!(updated.extra.get("owner"), Some(&Value::from("sam")));
        assert_eq!(updated.extra.get("venue"), Some(&Value::from("Room 4")));
    }

    #[test]
    fn test_submit_rejects_invalid_draft() {
        let d = EventDraft {
            from_time: "15:00".into(),
            to_time: "14:00".into(),
            ..draft()
        };
        assert_eq!(d.submit(None), Err(FormError::StartNotBeforeEnd));
    }
}
