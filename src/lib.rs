//! # Bookloader - Author and work dump loader
//!
//! Reads two newline-delimited dump files (authors, works), each line a JSON
//! object behind a non-JSON prefix, and persists typed records into SQLite.
//!
//! Bookloader provides:
//! - A lazy line reader for dump files
//! - Field-by-field record parsers for authors and works
//! - Author name resolution for works against already-loaded authors
//! - A save/lookup persistence gateway with a SQLite implementation
//! - A small read-only HTTP service over the loaded data

pub mod reference;
pub mod record;
pub mod dump;
pub mod parser;
pub mod repository;
pub mod resolver;
pub mod storage;
pub mod loader;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{Author, Book};
pub use repository::{AuthorRepository, BookRepository};
pub use loader::{Loader, LoadReport, StageReport, Stage};
pub use storage::SqliteStore;

/// Result type alias for Bookloader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bookloader operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line contains no JSON object")]
    MissingJson,

    #[error("Line payload is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}

impl Error {
    /// Whether the error is confined to a single dump line.
    ///
    /// Record-local errors are logged and the line is skipped; everything
    /// else aborts the stage (I/O) or the whole load (storage).
    pub fn is_record_local(&self) -> bool {
        matches!(
            self,
            Error::Json(_)
                | Error::MissingJson
                | Error::NotAnObject
                | Error::MissingField(_)
                | Error::InvalidField { .. }
                | Error::InvalidDate { .. }
        )
    }
}
