use std::path::Path;

use anyhow::{Context, Result};
use calview_core::calendar::Calendar;
use calview_core::config::CalendarConfig;
use calview_core::dnd::{DragItem, DropOutcome, DropTarget};
use calview_core::event::{CalendarEvent, ResizeEdge, ViewKind};
use calview_core::time::{format_clock, parse_clock};
use chrono::NaiveDate;

use crate::events_file;

/// One simulated drag from `from` onto a cell of the `to` view.
pub struct MoveArgs {
    pub id: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub from: ViewKind,
    pub to: ViewKind,
    pub resize: Option<ResizeEdge>,
}

pub fn run(config: CalendarConfig, events_path: &Path, args: MoveArgs) -> Result<()> {
    let events = events_file::load(events_path)?;
    let outcome = propose(config, &events, &args)?;

    tracing::info!(
        date = %outcome.result.date,
        time = ?outcome.result.time,
        source = %outcome.result.source_view,
        "Dropped"
    );
    println!("{}", serde_json::to_string_pretty(&outcome.event)?);

    Ok(())
}

fn propose(config: CalendarConfig, events: &[CalendarEvent], args: &MoveArgs) -> Result<DropOutcome> {
    let event = events
        .iter()
        .find(|e| e.id == args.id)
        .with_context(|| format!("Event '{}' not found", args.id))?;

    let item = match args.resize {
        Some(edge) => DragItem::resizing(event.clone(), edge, args.from),
        None => DragItem::moving(event.clone(), args.from),
    };

    let target = match &args.time {
        Some(time) => {
            let parsed = parse_clock(time)
                .with_context(|| format!("Invalid time '{time}'. Expected HH:MM"))?;
            DropTarget::slot(args.to, args.date, format_clock(parsed))
        }
        None => DropTarget::cell(args.to, args.date),
    };

    let mut calendar = Calendar::new(config, args.date, |_: CalendarEvent| {})?;
    Ok(calendar.handle_drop(&item, &target)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("1", "Offsite", "2025-04-13"),
            CalendarEvent::new("2", "Review", "2025-04-13").with_times("14:00", "15:00"),
        ]
    }

    fn args(id: &str) -> MoveArgs {
        MoveArgs {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            time: None,
            from: ViewKind::Month,
            to: ViewKind::Month,
            resize: None,
        }
    }

    #[test]
    fn test_propose_month_to_week_slot() {
        let args = MoveArgs {
            time: Some("09:30:00".into()),
            to: ViewKind::Week,
            ..args("1")
        };

        let outcome = propose(CalendarConfig::default(), &events(), &args).unwrap();

        assert_eq!(outcome.event.date, "2025-04-15");
        assert_eq!(outcome.event.from_time.as_deref(), Some("09:30"));
        assert_eq!(outcome.event.to_time.as_deref(), Some("10:30"));
    }

    #[test]
    fn test_propose_resize_end() {
        let args = MoveArgs {
            time: Some("16:00".into()),
            from: ViewKind::Day,
            to: ViewKind::Day,
            resize: Some(ResizeEdge::End),
            ..args("2")
        };

        let outcome = propose(CalendarConfig::default(), &events(), &args).unwrap();

        assert_eq!(outcome.event.date, "2025-04-15");
        assert_eq!(outcome.event.to_time.as_deref(), Some("16:00"));
        assert_eq!(outcome.event.is_resizing, None);
    }

    #[test]
    fn test_propose_unknown_id_or_time() {
        let err = propose(CalendarConfig::default(), &events(), &args("9")).unwrap_err();
        assert_eq!(err.to_string(), "Event '9' not found");

        let bad_time = MoveArgs {
            time: Some("noon".into()),
            ..args("1")
        };
        let err = propose(CalendarConfig::default(), &events(), &bad_time).unwrap_err();
        assert!(err.to_string().contains("Invalid time 'noon'"));
    }
}
