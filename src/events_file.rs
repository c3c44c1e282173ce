//! Loading event lists from JSON files.

use std::path::Path;

use anyhow::{Context, Result};
use calview_core::event::CalendarEvent;

/// Read a JSON array of events. Fields the calendar doesn't know are kept.
pub fn load(path: &Path) -> Result<Vec<CalendarEvent>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read events file {}", path.display()))?;

    let events: Vec<CalendarEvent> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of events", path.display()))?;

    tracing::debug!(count = events.len(), path = %path.display(), "Loaded events");
    Ok(events)
}
