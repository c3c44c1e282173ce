//! Error types for calview.

use thiserror::Error;

use crate::event::ViewKind;

/// Errors that can occur in calview operations.
///
/// The view and drag/drop paths never produce these for bad event data;
/// they are reserved for configuration problems, explicit strict-mode
/// classification and caller mistakes such as selecting a disabled mode.
#[derive(Error, Debug)]
pub enum CalViewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event '{id}' has an unparseable date: '{value}'")]
    UnparseableDate { id: String, value: String },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("View mode '{0}' is disabled")]
    ModeDisabled(ViewKind),

    #[error("All view modes are disabled")]
    NoEnabledModes,

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calview operations.
pub type CalViewResult<T> = Result<T, CalViewError>;
