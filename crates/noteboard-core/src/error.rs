//! Error types for noteboard-core

use thiserror::Error;

/// Result type alias using noteboard-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in noteboard-core operations
///
/// Missing notes and malformed persisted state are never reported through
/// this type; `NoteStore` treats them as no-ops and empty collections.
#[derive(Error, Debug)]
pub enum Error {
    /// Key-value backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
