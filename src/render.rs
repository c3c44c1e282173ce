//! Terminal rendering for calview views.
//!
//! Extension traits that draw the core view models as colored text using
//! owo_colors. Layout decisions (which events go where, how many fit in a
//! month cell) are already made by the view models; this only draws them.

use calview_core::calendar::CalendarView;
use calview_core::config::CalendarConfig;
use calview_core::event::{CalendarEvent, EventColor};
use calview_core::view::{CellEvents, DayColumn, DayView, MonthCell, MonthView, WeekView};
use chrono::Datelike;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Rendering for the calendar grids, which depends on display settings.
pub trait ViewRender {
    fn render(&self, style: &RenderStyle) -> String;
}

/// Display settings that affect how the grids are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Prefix event titles with their `type` tag
    pub show_icon: bool,
    /// Separate columns with rules and rows with lines
    pub borders: bool,
}

impl RenderStyle {
    pub fn from_config(config: &CalendarConfig) -> Self {
        RenderStyle {
            show_icon: config.show_icon,
            borders: !config.no_border,
        }
    }

    fn separator(&self) -> &'static str {
        if self.borders { "│" } else { " " }
    }

    /// Horizontal rule spanning `columns` cells, drawn only with borders.
    fn rule(&self, lead: usize, columns: usize) -> Option<String> {
        if !self.borders {
            return None;
        }
        let width = lead + columns * (CELL_WIDTH + 1);
        Some("─".repeat(width).dimmed().to_string())
    }

    fn title(&self, event: &CalendarEvent) -> String {
        match &event.event_type {
            Some(tag) if self.show_icon => format!("[{tag}] {event}"),
            _ => event.to_string(),
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle::from_config(&CalendarConfig::default())
    }
}

/// Width of a month cell or week column, in characters
const CELL_WIDTH: usize = 14;

/// Width of the hour label gutter in week and day views
const GUTTER_WIDTH: usize = 9;

/// Truncate or pad `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{text:<width$}")
    }
}

fn paint(text: &str, color: EventColor) -> String {
    match color {
        EventColor::Blue => text.blue().to_string(),
        EventColor::Green => text.green().to_string(),
        EventColor::Red => text.red().to_string(),
        EventColor::Yellow => text.yellow().to_string(),
        EventColor::Gray => text.bright_black().to_string(),
    }
}

fn event_chip(event: &CalendarEvent, style: &RenderStyle) -> String {
    paint(&fit(&style.title(event), CELL_WIDTH), event.display_color())
}

/// Lines of cells side by side; short cells are padded with blanks.
fn stack_rows(
    columns: &[Vec<String>],
    lead: &[String],
    gutter: usize,
    style: &RenderStyle,
) -> Vec<String> {
    let depth = columns.iter().map(Vec::len).max().unwrap_or(0).max(lead.len());
    (0..depth)
        .map(|i| {
            let mut line = lead.get(i).cloned().unwrap_or_else(|| " ".repeat(gutter));
            if !line.is_empty() {
                line.push_str(style.separator());
            }
            let cells: Vec<String> = columns
                .iter()
                .map(|c| c.get(i).cloned().unwrap_or_else(|| " ".repeat(CELL_WIDTH)))
                .collect();
            line.push_str(&cells.join(style.separator()));
            line
        })
        .collect()
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = if self.is_full_day() {
            "all-day".to_string()
        } else {
            match (&self.from_time, &self.to_time) {
                (Some(from), Some(to)) => format!("{from}-{to}"),
                (Some(from), None) => from.clone(),
                _ => "no time".to_string(),
            }
        };
        let id = format!("[{}]", self.id);

        format!(
            "{} {} {} {}",
            self.date,
            time.dimmed(),
            paint(&self.to_string(), self.display_color()),
            id.dimmed()
        )
    }
}

fn month_cell_lines(cell: &MonthCell, style: &RenderStyle) -> Vec<String> {
    match &cell.events {
        CellEvents::List(events) => events.iter().map(|e| event_chip(e, style)).collect(),
        CellEvents::ShowMore { first, .. } => {
            let more = fit(&format!("+{} more", cell.events.hidden()), CELL_WIDTH);
            vec![event_chip(first, style), more.dimmed().to_string()]
        }
    }
}

fn month_day_number(cell: &MonthCell) -> String {
    let number = fit(&format!("{:>2}", cell.date.day()), CELL_WIDTH);
    if cell.is_today {
        number.reversed().to_string()
    } else if !cell.in_month {
        number.dimmed().to_string()
    } else {
        number.bold().to_string()
    }
}

impl ViewRender for MonthView<'_> {
    fn render(&self, style: &RenderStyle) -> String {
        let weekdays: Vec<String> = self.weekdays.iter().map(|d| fit(d, CELL_WIDTH)).collect();
        let mut lines = vec![
            self.title.bold().to_string(),
            weekdays.join(style.separator()).dimmed().to_string(),
        ];

        for row in &self.rows {
            lines.extend(style.rule(0, row.len()));

            let numbers: Vec<String> = row.iter().map(month_day_number).collect();
            lines.push(numbers.join(style.separator()));

            let cells: Vec<Vec<String>> = row.iter().map(|c| month_cell_lines(c, style)).collect();
            lines.extend(stack_rows(&cells, &[], 0, style));
        }

        lines.join("\n")
    }
}

/// Titles of the events starting in `hour`, for one grid column.
fn starting_in(column: &DayColumn, hour: usize, style: &RenderStyle) -> Vec<String> {
    column
        .timed
        .iter()
        .filter(|placed| placed.row as usize == hour + 1)
        .map(|placed| event_chip(placed.event, style))
        .collect()
}

impl ViewRender for WeekView<'_> {
    fn render(&self, style: &RenderStyle) -> String {
        let headers: Vec<String> = self
            .headers
            .iter()
            .zip(&self.columns)
            .map(|((name, day), column)| {
                let text = fit(&format!("{name} {day}"), CELL_WIDTH);
                if column.is_today {
                    text.reversed().to_string()
                } else {
                    text.bold().to_string()
                }
            })
            .collect();

        let mut lines = vec![
            self.title.bold().to_string(),
            format!(
                "{}{}{}",
                " ".repeat(GUTTER_WIDTH),
                style.separator(),
                headers.join(style.separator())
            ),
        ];

        let lane: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.full_day.iter().map(|e| event_chip(e, style)).collect())
            .collect();
        let lane_label = fit("all-day", GUTTER_WIDTH).dimmed().to_string();
        lines.extend(stack_rows(&lane, &[lane_label], GUTTER_WIDTH, style));
        lines.extend(style.rule(GUTTER_WIDTH, self.columns.len()));

        for (hour, label) in self.hour_labels.iter().enumerate() {
            let cells: Vec<Vec<String>> =
                self.columns.iter().map(|c| starting_in(c, hour, style)).collect();
            let label = fit(label, GUTTER_WIDTH).dimmed().to_string();
            lines.extend(stack_rows(&cells, &[label], GUTTER_WIDTH, style));
        }

        lines.join("\n")
    }
}

impl ViewRender for DayView<'_> {
    fn render(&self, style: &RenderStyle) -> String {
        let sep = style.separator();
        let mut lines = vec![self.heading.bold().to_string()];

        let lane_label = fit("all-day", GUTTER_WIDTH).dimmed().to_string();
        if self.column.full_day.is_empty() {
            lines.push(lane_label);
        } else {
            for (i, event) in self.column.full_day.iter().enumerate() {
                let label = if i == 0 { lane_label.clone() } else { " ".repeat(GUTTER_WIDTH) };
                let title = paint(&style.title(event), event.display_color());
                lines.push(format!("{label}{sep}{title}"));
            }
        }
        lines.extend(style.rule(GUTTER_WIDTH, 1));

        let now_hour = self
            .time_marker
            .map(|offset| ((offset - self.lane_height) / self.hour_height).floor() as usize);

        for (hour, label) in self.hour_labels.iter().enumerate() {
            let marker = if now_hour == Some(hour) { "▸".red().to_string() } else { " ".to_string() };
            let gutter = format!("{}{}", marker, fit(label, GUTTER_WIDTH - 1).dimmed());

            let placed: Vec<_> = self
                .column
                .timed
                .iter()
                .filter(|p| p.row as usize == hour + 1)
                .collect();

            if placed.is_empty() {
                lines.push(format!("{gutter}{sep}"));
                continue;
            }
            for (i, p) in placed.iter().enumerate() {
                let lead = if i == 0 { gutter.clone() } else { " ".repeat(GUTTER_WIDTH) };
                let duration = p.duration.clone().unwrap_or_default();
                lines.push(format!(
                    "{lead}{sep}{} {}",
                    paint(&style.title(p.event), p.event.display_color()),
                    duration.dimmed()
                ));
            }
        }

        lines.join("\n")
    }
}

impl ViewRender for CalendarView<'_> {
    fn render(&self, style: &RenderStyle) -> String {
        match self {
            CalendarView::Month(view) => view.render(style),
            CalendarView::Week(view) => view.render(style),
            CalendarView::Day(view) => view.render(style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calview_core::classify::{UnparseableDates, classify};
    use calview_core::view::{day_view, month_view, week_view};
    use chrono::NaiveDate;

    fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("1", "Holiday", "2025-04-14").full_day(),
            CalendarEvent::new("2", "Standup", "2025-04-14").with_times("09:00", "09:15"),
            CalendarEvent::new("3", "Review", "2025-04-14").with_times("14:00", "15:00"),
        ]
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("abcde", 5), "abcde");
    }

    #[test]
    fn test_style_follows_config() {
        let config = CalendarConfig {
            show_icon: false,
            no_border: true,
            ..CalendarConfig::default()
        };
        let style = RenderStyle::from_config(&config);
        assert!(!style.show_icon);
        assert!(!style.borders);

        let default = RenderStyle::default();
        assert!(default.show_icon);
        assert!(default.borders);
    }

    #[test]
    fn test_type_tag_shown_only_with_show_icon() {
        let mut event = CalendarEvent::new("1", "Standup", "2025-04-14");
        event.event_type = Some("meeting".into());

        let with_icon = RenderStyle::default();
        let without = RenderStyle {
            show_icon: false,
            ..with_icon
        };

        assert_eq!(with_icon.title(&event), "[meeting] Standup");
        assert_eq!(without.title(&event), "Standup");
    }

    #[test]
    fn test_month_render_collapses_busy_cells() {
        let events = events();
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(april(14), april(14), &buckets).unwrap();

        let out = view.render(&RenderStyle::default());

        assert!(out.contains("April 2025"));
        assert!(out.contains("Holiday"));
        assert!(out.contains("+2 more"));
        assert!(!out.contains("Standup"));
    }

    #[test]
    fn test_borders_can_be_turned_off() {
        let events = events();
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let view = month_view(april(14), april(14), &buckets).unwrap();

        let bordered = view.render(&RenderStyle::default());
        let plain = view.render(&RenderStyle {
            borders: false,
            ..RenderStyle::default()
        });

        assert!(bordered.contains('│'));
        assert!(bordered.contains('─'));
        assert!(!plain.contains('│'));
        assert!(!plain.contains('─'));
    }

    #[test]
    fn test_week_render_lists_lane_and_timed_events() {
        let events = events();
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let now = april(16).and_hms_opt(8, 0, 0).unwrap();
        let view = week_view(april(16), now, &buckets, &CalendarConfig::default()).unwrap();

        let out = view.render(&RenderStyle::default());

        assert!(out.contains("Mon 14"));
        assert!(out.contains("all-day"));
        assert!(out.contains("Holiday"));
        assert!(out.contains("Standup"));
        assert!(out.contains("Review"));
    }

    #[test]
    fn test_day_render_shows_durations_and_now_marker() {
        let events = events();
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let now = april(14).and_hms_opt(14, 30, 0).unwrap();
        let view = day_view(april(14), now, &buckets, &CalendarConfig::default());

        let out = view.render(&RenderStyle::default());
        let review_line = out.lines().find(|l| l.contains("Review")).unwrap();

        assert!(out.starts_with(&"Monday, April 14, 2025".bold().to_string()));
        assert!(review_line.contains("2:00 PM - 3:00 PM"));
        assert!(review_line.contains('▸'));
    }

    #[test]
    fn test_day_render_with_empty_lane() {
        let events = vec![CalendarEvent::new("2", "Standup", "2025-04-14").with_times("09:00", "09:15")];
        let buckets = classify(&events, UnparseableDates::Drop).unwrap();
        let now = april(14).and_hms_opt(8, 0, 0).unwrap();
        let view = day_view(april(14), now, &buckets, &CalendarConfig::default());

        let out = view.render(&RenderStyle::default());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[1].contains("all-day"));
        assert!(!lines[1].contains("Standup"));
        assert!(out.contains("Standup"));
    }

    #[test]
    fn test_event_render_shows_time_and_id() {
        let event = CalendarEvent::new("9", "", "2025-04-14").with_times("10:00", "11:00");
        let out = event.render();

        assert!(out.contains("New Event"));
        assert!(out.contains("10:00-11:00"));
        assert!(out.contains("[9]"));
    }
}
