pub mod check;
pub mod config;
pub mod move_event;
pub mod show;
