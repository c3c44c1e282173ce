use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::classify::EventBuckets;
use crate::config::CalendarConfig;
use crate::error::CalViewResult;
use crate::event::ViewKind;
use crate::grid::{DAYS_IN_WEEK, WEEKDAY_LABELS, month_title, week_dates};
use crate::time::hour_labels;

use super::{DayColumn, initial_scroll, time_marker_offset};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekView<'a> {
    pub title: String,
    /// Column headers: weekday name with its day of month, e.g. ("Sun", 13)
    pub headers: [(&'static str, u32); DAYS_IN_WEEK],
    pub hour_labels: Vec<String>,
    pub columns: Vec<DayColumn<'a>>,
    /// Column index and pixel offset of the current-time line
    pub time_marker: Option<(usize, f32)>,
    pub scroll_to: f32,
}

pub fn week_view<'a>(
    anchor: NaiveDate,
    now: NaiveDateTime,
    buckets: &EventBuckets<'a>,
    config: &CalendarConfig,
) -> CalViewResult<WeekView<'a>> {
    let dates = week_dates(anchor)?;
    let today = now.date();

    let mut headers = [("", 0); DAYS_IN_WEEK];
    for (header, (label, date)) in headers.iter_mut().zip(WEEKDAY_LABELS.iter().zip(dates)) {
        *header = (*label, date.day());
    }

    let columns: Vec<DayColumn<'a>> = dates
        .iter()
        .map(|&date| DayColumn::build(ViewKind::Week, date, today, buckets, config))
        .collect();

    let time_marker = dates
        .iter()
        .enumerate()
        .find_map(|(i, &date)| time_marker_offset(date, now, config).map(|offset| (i, offset)));

    Ok(WeekView {
        title: month_title(anchor),
        headers,
        hour_labels: hour_labels(config.time_format),
        columns,
        time_marker,
        scroll_to: initial_scroll(dates.contains(&today), now, config),
    })
}
