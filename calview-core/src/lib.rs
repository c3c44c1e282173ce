//! Core logic for calview month, week and day calendar views.
//!
//! This crate has no rendering of its own. It provides:
//! - `event` and `time` for the event record and `HH:MM` clock strings
//! - `grid` for month and week date grids
//! - `classify` for bucketing events by date into full-day and timed groups
//! - `view` for the view models a front end draws
//! - `dnd` for drag items, drop targets and drop application
//! - `calendar` for the container that owns mode, navigation and drops
//! - `form` and `overlay` for the event editor and floating popups

pub mod calendar;
pub mod classify;
pub mod config;
pub mod dnd;
pub mod error;
pub mod event;
pub mod form;
pub mod grid;
pub mod overlay;
pub mod time;
pub mod view;

pub use calendar::{Calendar, CalendarView, Rendered, UpdateHandler};
pub use classify::{EventBuckets, UnparseableDates, classify};
pub use config::CalendarConfig;
pub use dnd::{DragItem, DropOutcome, DropResult, DropTarget, MoveTiming};
pub use error::{CalViewError, CalViewResult};
pub use event::{CalendarEvent, EventColor, ResizeEdge, ViewKind};
