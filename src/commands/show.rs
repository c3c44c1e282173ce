use std::path::Path;

use anyhow::Result;
use calview_core::calendar::Calendar;
use calview_core::config::CalendarConfig;
use calview_core::event::{CalendarEvent, ViewKind};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

use crate::events_file;
use crate::render::{RenderStyle, ViewRender};

pub fn run(
    config: CalendarConfig,
    view: Option<ViewKind>,
    date: Option<NaiveDate>,
    events_path: &Path,
) -> Result<()> {
    let events = events_file::load(events_path)?;
    let now = Local::now().naive_local();

    // Nothing is edited here, so proposed updates are ignored
    let mut calendar = Calendar::new(config, date.unwrap_or(now.date()), |_: CalendarEvent| {})?;
    if let Some(view) = view {
        calendar.set_mode(view)?;
    }

    let style = RenderStyle::from_config(calendar.config());
    let rendered = calendar.render(&events, now)?;
    println!("{}", rendered.view.render(&style));

    if !rendered.dropped.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} event(s) not shown, run `calview check` for details", rendered.dropped.len())
                .yellow()
        );
    }

    Ok(())
}
