//! Calendar container: active view mode, navigation and drop dispatch.

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::classify::{DroppedEvent, classify};
use crate::config::CalendarConfig;
use crate::dnd::{DragItem, DropOutcome, DropTarget};
use crate::error::{CalViewError, CalViewResult};
use crate::event::{CalendarEvent, ViewKind};
use crate::grid::{long_heading, month_title};
use crate::overlay::{Overlay, OverlayId, overlay_root};
use crate::view::{DayView, MonthView, WeekView, day_view, month_view, week_view};

/// Receives the proposed event after a drop. The owner decides whether to
/// keep it.
pub trait UpdateHandler {
    fn on_update(&mut self, event: CalendarEvent);
}

impl<F: FnMut(CalendarEvent)> UpdateHandler for F {
    fn on_update(&mut self, event: CalendarEvent) {
        self(event)
    }
}

/// The active view, built for one render.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarView<'a> {
    Month(MonthView<'a>),
    Week(WeekView<'a>),
    Day(DayView<'a>),
}

impl CalendarView<'_> {
    pub fn kind(&self) -> ViewKind {
        match self {
            CalendarView::Month(_) => ViewKind::Month,
            CalendarView::Week(_) => ViewKind::Week,
            CalendarView::Day(_) => ViewKind::Day,
        }
    }
}

/// A rendered view plus the events that could not be placed in it.
#[derive(Debug)]
pub struct Rendered<'a> {
    pub view: CalendarView<'a>,
    pub dropped: Vec<DroppedEvent<'a>>,
}

pub struct Calendar<H> {
    config: CalendarConfig,
    mode: ViewKind,
    anchor: NaiveDate,
    handler: H,
}

impl<H: UpdateHandler> Calendar<H> {
    /// Start on the configured default mode, falling back to month (or the
    /// first enabled mode when month is disabled).
    pub fn new(config: CalendarConfig, anchor: NaiveDate, handler: H) -> CalViewResult<Self> {
        config.validate()?;

        let enabled = enabled_modes(&config);
        let mode = [config.default_mode, ViewKind::Month]
            .into_iter()
            .chain(enabled.iter().copied())
            .find(|m| enabled.contains(m))
            .ok_or(CalViewError::NoEnabledModes)?;

        Ok(Calendar {
            config,
            mode,
            anchor,
            handler,
        })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn mode(&self) -> ViewKind {
        self.mode
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Modes offered by the mode switcher, in tab order.
    pub fn enabled_modes(&self) -> Vec<ViewKind> {
        enabled_modes(&self.config)
    }

    pub fn set_mode(&mut self, mode: ViewKind) -> CalViewResult<()> {
        if self.config.disable_modes.contains(&mode) {
            warn!(%mode, "Ignoring switch to disabled mode");
            return Err(CalViewError::ModeDisabled(mode));
        }
        self.mode = mode;
        Ok(())
    }

    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// Advance by one month, week or day depending on the mode.
    pub fn next(&mut self) -> CalViewResult<()> {
        self.step(true)
    }

    pub fn previous(&mut self) -> CalViewResult<()> {
        self.step(false)
    }

    fn step(&mut self, forward: bool) -> CalViewResult<()> {
        let anchor = self.anchor;
        let moved = match (self.mode, forward) {
            (ViewKind::Month, true) => anchor.checked_add_months(Months::new(1)),
            (ViewKind::Month, false) => anchor.checked_sub_months(Months::new(1)),
            (ViewKind::Week, true) => anchor.checked_add_days(Days::new(7)),
            (ViewKind::Week, false) => anchor.checked_sub_days(Days::new(7)),
            (ViewKind::Day, true) => anchor.checked_add_days(Days::new(1)),
            (ViewKind::Day, false) => anchor.checked_sub_days(Days::new(1)),
        };

        self.anchor = moved.ok_or_else(|| CalViewError::DateOutOfRange(anchor.to_string()))?;
        debug!(mode = %self.mode, anchor = %self.anchor, "Navigated");
        Ok(())
    }

    /// Header text: `April 2025` for month and week, the long date for day.
    pub fn title(&self) -> String {
        match self.mode {
            ViewKind::Month | ViewKind::Week => month_title(self.anchor),
            ViewKind::Day => long_heading(self.anchor),
        }
    }

    /// Build the active view from the owner's events.
    pub fn render<'a>(
        &self,
        events: &'a [CalendarEvent],
        now: NaiveDateTime,
    ) -> CalViewResult<Rendered<'a>> {
        let mut buckets = classify(events, self.config.unparseable_dates)?;

        let view = match self.mode {
            ViewKind::Month => CalendarView::Month(month_view(self.anchor, now.date(), &buckets)?),
            ViewKind::Week => {
                CalendarView::Week(week_view(self.anchor, now, &buckets, &self.config)?)
            }
            ViewKind::Day => CalendarView::Day(day_view(self.anchor, now, &buckets, &self.config)),
        };

        Ok(Rendered {
            view,
            dropped: std::mem::take(&mut buckets.dropped),
        })
    }

    /// Apply a completed drop and hand the proposed event to the owner.
    pub fn handle_drop(&mut self, item: &DragItem, target: &DropTarget) -> CalViewResult<DropOutcome> {
        let options = self.config.drop_options()?;
        let outcome = target.accept(item, &options);
        self.handler.on_update(outcome.event.clone());
        Ok(outcome)
    }

    /// Open the editor for `event`, or for a new event on `date`.
    pub fn open_editor(&self, event: Option<&CalendarEvent>, date: NaiveDate) -> OverlayId {
        overlay_root().open(Overlay::EventEditor {
            event_id: event.map(|e| e.id.clone()),
            date,
        })
    }

    /// Open the full event list of a collapsed month cell.
    pub fn show_more(&self, date: NaiveDate) -> OverlayId {
        overlay_root().open(Overlay::ShowMore { date })
    }
}

fn enabled_modes(config: &CalendarConfig) -> Vec<ViewKind> {
    ViewKind::ALL
        .into_iter()
        .filter(|m| !config.disable_modes.contains(m))
        .collect()
}
