use std::path::Path;

use anyhow::Result;
use calview_core::classify::{UnparseableDates, classify};
use calview_core::event::CalendarEvent;
use owo_colors::OwoColorize;

use crate::events_file;
use crate::render::Render;

/// A problem with one event in the file.
#[derive(Debug, PartialEq)]
struct Finding<'a> {
    event: &'a CalendarEvent,
    reason: String,
}

pub fn run(events_path: &Path) -> Result<()> {
    let events = events_file::load(events_path)?;
    let findings = inspect(&events)?;

    if findings.is_empty() {
        println!("{}", format!("All {} events can be shown", events.len()).green());
        return Ok(());
    }

    for finding in &findings {
        println!("{} {}", "✗".red(), finding.event.render());
        println!("    {}", finding.reason.dimmed());
    }

    anyhow::bail!("{} of {} events have problems", findings.len(), events.len())
}

/// Events the views would drop, then timed events whose end is before their start.
fn inspect(events: &[CalendarEvent]) -> Result<Vec<Finding<'_>>> {
    // Always collect rather than fail so every problem is listed
    let buckets = classify(events, UnparseableDates::Drop)?;

    let mut findings: Vec<Finding> = buckets
        .dropped
        .iter()
        .map(|dropped| Finding {
            event: dropped.event,
            reason: dropped.reason.clone(),
        })
        .collect();

    findings.extend(
        events
            .iter()
            .filter(|e| !e.is_full_day() && e.parsed_date().is_some() && !e.has_valid_range())
            .map(|event| Finding {
                event,
                reason: format!(
                    "Start time {} is after end time {}",
                    event.from_time.as_deref().unwrap_or_default(),
                    event.to_time.as_deref().unwrap_or_default()
                ),
            }),
    );

    Ok(findings)
}
