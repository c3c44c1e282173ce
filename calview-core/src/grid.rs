//! Date-grid generation for month and week views.
//!
//! Weeks start on Sunday. Month grids always cover whole weeks: 5 rows when
//! the month fits, 6 otherwise.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CalViewError, CalViewResult};

pub const DAYS_IN_WEEK: usize = 7;

/// Column headers for the Sunday-start grid.
pub const WEEKDAY_LABELS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const FIVE_ROWS: usize = 5 * DAYS_IN_WEEK;
const SIX_ROWS: usize = 6 * DAYS_IN_WEEK;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Resolve a zero-based month index with rollover into (year, month 1-12).
/// Month 12 is January of the next year, month -1 December of the previous.
fn normalize_month(month_index: i32, year: i32) -> CalViewResult<(i32, u32)> {
    let year = year
        .checked_add(month_index.div_euclid(12))
        .ok_or_else(|| out_of_range(month_index, year))?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    Ok((year, month))
}

fn out_of_range(month_index: i32, year: i32) -> CalViewError {
    CalViewError::DateOutOfRange(format!("month {} of year {}", month_index, year))
}

/// Dates shown by a month grid: trailing days of the previous month, every
/// day of the month, then leading days of the next month up to 35 or 42
/// cells.
///
/// `month_index` is zero-based (0 = January) and rolls over into adjacent
/// years when outside 0..12.
pub fn month_dates(month_index: i32, year: i32) -> CalViewResult<Vec<NaiveDate>> {
    let (year, month) = normalize_month(month_index, year)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| out_of_range(month_index, year))?;

    let offset = first.weekday().num_days_from_sunday();
    let start = first
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| out_of_range(month_index, year))?;

    let filled = (offset + days_in_month(year, month)) as usize;
    let cells = if filled <= FIVE_ROWS { FIVE_ROWS } else { SIX_ROWS };

    let dates: Vec<NaiveDate> = start.iter_days().take(cells).collect();
    if dates.len() != cells {
        return Err(out_of_range(month_index, year));
    }

    Ok(dates)
}

/// Month grid for the month containing `anchor`.
pub fn month_dates_for(anchor: NaiveDate) -> CalViewResult<Vec<NaiveDate>> {
    month_dates(anchor.month0() as i32, anchor.year())
}

/// The Sunday-start week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> CalViewResult<[NaiveDate; DAYS_IN_WEEK]> {
    let offset = anchor.weekday().num_days_from_sunday();
    let sunday = anchor
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| CalViewError::DateOutOfRange(anchor.to_string()))?;

    let mut week = [sunday; DAYS_IN_WEEK];
    for (i, day) in week.iter_mut().enumerate() {
        *day = sunday
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| CalViewError::DateOutOfRange(anchor.to_string()))?;
    }

    Ok(week)
}

/// Header for month and week modes, e.g. `April 2025`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Long heading for the day view, e.g. `Sunday, April 13, 2025`.
pub fn long_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
