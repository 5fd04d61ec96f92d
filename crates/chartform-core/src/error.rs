// crates/chartform-core/src/error.rs
use thiserror::Error;

/// Errors produced by the chart form core.
///
/// Validation failures the user can fix (an unknown location) are *not*
/// errors: they surface through the session's modal. This enum covers the
/// operational failures: loading data, parsing input and talking to the
/// server.
#[derive(Debug, Error)]
pub enum ChartFormError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "cache")]
    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid date {0:?}: expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("invalid time {0:?}: expected HH:MM")]
    InvalidTime(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChartFormError>;
