//! Errors at the recent-colors persistence boundary.

use thiserror::Error;

/// Failures while loading or saving the recent-colors list.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store has no location to read from or write to
    #[error("No storage location available")]
    NoLocation,
}

pub type HistoryResult<T> = Result<T, HistoryError>;
