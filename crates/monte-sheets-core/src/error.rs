//! Error types for monte-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in monte-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell id format
    #[error("Invalid cell id: {0}")]
    InvalidCellId(String),

    /// Cell id not present in the namespace
    #[error("Unknown cell: {0}")]
    UnknownCell(String),
}
