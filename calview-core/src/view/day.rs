use chrono::{NaiveDate, NaiveDateTime};

use crate::classify::EventBuckets;
use crate::config::CalendarConfig;
use crate::event::ViewKind;
use crate::grid::long_heading;
use crate::time::hour_labels;

use super::{DayColumn, initial_scroll, time_marker_offset};

#[derive(Debug, Clone, PartialEq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    /// e.g. `Sunday, April 13, 2025`
    pub heading: String,
    pub hour_labels: Vec<String>,
    pub column: DayColumn<'a>,
    pub lane_height: f32,
    pub hour_height: f32,
    pub time_marker: Option<f32>,
    pub scroll_to: f32,
}

pub fn day_view<'a>(
    date: NaiveDate,
    now: NaiveDateTime,
    buckets: &EventBuckets<'a>,
    config: &CalendarConfig,
) -> DayView<'a> {
    DayView {
        date,
        heading: long_heading(date),
        hour_labels: hour_labels(config.time_format),
        column: DayColumn::build(ViewKind::Day, date, now.date(), buckets, config),
        lane_height: config.redundant_cell_height,
        hour_height: config.hour_height,
        time_marker: time_marker_offset(date, now, config),
        scroll_to: initial_scroll(date == now.date(), now, config),
    }
}
