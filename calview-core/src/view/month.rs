use chrono::{Datelike, NaiveDate};

use crate::classify::EventBuckets;
use crate::dnd::DropTarget;
use crate::error::CalViewResult;
use crate::event::{CalendarEvent, ViewKind};
use crate::grid::{DAYS_IN_WEEK, WEEKDAY_LABELS, month_dates_for, month_title};

/// Events listed in a month cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEvents<'a> {
    /// Few enough to list in full
    List(Vec<&'a CalendarEvent>),
    /// Too many: show the first one compactly with a "+N more" link
    ShowMore { first: &'a CalendarEvent, total: usize },
}

impl CellEvents<'_> {
    pub fn total(&self) -> usize {
        match self {
            CellEvents::List(events) => events.len(),
            CellEvents::ShowMore { total, .. } => *total,
        }
    }

    /// Events behind the "+N more" link
    pub fn hidden(&self) -> usize {
        match self {
            CellEvents::List(_) => 0,
            CellEvents::ShowMore { total, .. } => total - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    /// Whether the date belongs to the displayed month (others are dimmed)
    pub in_month: bool,
    pub is_today: bool,
    pub events: CellEvents<'a>,
    pub target: DropTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView<'a> {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub title: String,
    pub weekdays: [&'static str; DAYS_IN_WEEK],
    /// 5 or 6 rows of 7 cells
    pub rows: Vec<Vec<MonthCell<'a>>>,
    pub max_events_in_cell: usize,
}

impl<'a> MonthView<'a> {
    pub fn cells(&self) -> impl Iterator<Item = &MonthCell<'a>> {
        self.rows.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell<'a>> {
        self.cells().find(|c| c.date == date)
    }
}

/// Build the month grid around `anchor`. Six-row months fit one event per
/// cell before collapsing, five-row months fit two.
pub fn month_view<'a>(
    anchor: NaiveDate,
    today: NaiveDate,
    buckets: &EventBuckets<'a>,
) -> CalViewResult<MonthView<'a>> {
    let dates = month_dates_for(anchor)?;
    let max_events_in_cell = if dates.len() > 35 { 1 } else { 2 };

    let cells: Vec<MonthCell<'a>> = dates
        .into_iter()
        .map(|date| {
            let events: Vec<&'a CalendarEvent> = buckets
                .full_day_on(date)
                .iter()
                .chain(buckets.timed_on(date))
                .copied()
                .collect();

            let events = if events.len() > max_events_in_cell {
                CellEvents::ShowMore {
                    first: events[0],
                    total: events.len(),
                }
            } else {
                CellEvents::List(events)
            };

            MonthCell {
                date,
                in_month: date.month() == anchor.month() && date.year() == anchor.year(),
                is_today: date == today,
                events,
                target: DropTarget::cell(ViewKind::Month, date),
            }
        })
        .collect();

    let rows = cells.chunks(DAYS_IN_WEEK).map(|row| row.to_vec()).collect();

    Ok(MonthView {
        year: anchor.year(),
        month: anchor.month(),
        title: month_title(anchor),
        weekdays: WEEKDAY_LABELS,
        rows,
        max_events_in_cell,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{UnparseableDates, classify};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_view_rows_and_flags() {
        let events = vec![];
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(ymd(2025, 4, 13), ymd(2025, 4, 13), &buckets).unwrap();

        assert_eq!(view.title, "April 2025");
        assert_eq!(view.rows.len(), 5);
        assert!(view.rows.iter().all(|r| r.len() == 7));
        assert_eq!(view.max_events_in_cell, 2);

        let first = &view.rows[0][0];
        assert_eq!(first.date, ymd(2025, 3, 30));
        assert!(!first.in_month);

        let today = view.cell(ymd(2025, 4, 13)).unwrap();
        assert!(today.in_month);
        assert!(today.is_today);
        assert_eq!(today.target, DropTarget::cell(ViewKind::Month, ymd(2025, 4, 13)));
        assert_eq!(view.cells().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_cells_collapse_past_the_limit() {
        let events = vec![
            CalendarEvent::new("1", "Holiday", "2025-04-13").full_day(),
            CalendarEvent::new("2", "Standup", "2025-04-13").with_times("09:00", "09:15"),
            CalendarEvent::new("3", "Review", "2025-04-13").with_times("14:00", "15:00"),
            CalendarEvent::new("4", "Lunch", "2025-04-14").with_times("12:00", "13:00"),
        ];
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(ymd(2025, 4, 1), ymd(2025, 4, 1), &buckets).unwrap();

        let busy = view.cell(ymd(2025, 4, 13)).unwrap();
        match &busy.events {
            CellEvents::ShowMore { first, total } => {
                assert_eq!(first.id, "1", "full-day events come first");
                assert_eq!(*total, 3);
            }
            other => panic!("Expected ShowMore, got {:?}", other),
        }
        assert_eq!(busy.events.hidden(), 2);

        let quiet = view.cell(ymd(2025, 4, 14)).unwrap();
        assert_eq!(quiet.events, CellEvents::List(vec![&events[3]]));
    }

    #[test]
    fn test_six_row_month_shows_one_event_per_cell() {
        let events = vec![
            CalendarEvent::new("1", "A", "2025-03-10").with_times("09:00", "10:00"),
            CalendarEvent::new("2", "B", "2025-03-10").with_times("11:00", "12:00"),
        ];
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(ymd(2025, 3, 10), ymd(2025, 1, 1), &buckets).unwrap();

        assert_eq!(view.rows.len(), 6);
        assert_eq!(view.max_events_in_cell, 1);
        assert_eq!(view.cell(ymd(2025, 3, 10)).unwrap().events.hidden(), 1);
    }

    #[test]
    fn test_events_outside_the_grid_are_omitted() {
        let events = vec![CalendarEvent::new("1", "Far away", "2026-01-01")];
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(ymd(2025, 4, 1), ymd(2025, 4, 1), &buckets).unwrap();

        assert_eq!(view.cells().map(|c| c.events.total()).sum::<usize>(), 0);
    }
}
