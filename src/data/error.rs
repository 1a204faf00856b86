//! Error types for the data pipeline.
//!
//! Every pipeline stage either returns a complete result or signals exactly
//! one of these errors; partial results are never surfaced and nothing is
//! retried internally.

use thiserror::Error;

/// Errors that can terminate a parse attempt or a repository operation.
///
/// Messages are user-facing and shown verbatim.
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File exceeds the configured size ceiling
    #[error("File size exceeds maximum of {max_mb}MB")]
    FileTooLarge { size: u64, max_mb: u64 },

    /// Parse produced zero rows (a header-only file is *not* empty)
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row exceeds the configured column ceiling
    #[error("CSV has {columns} columns, maximum is {max_columns}")]
    TooManyColumns { columns: usize, max_columns: usize },

    /// Data rows exceed the configured row ceiling
    #[error("CSV has {rows} rows, maximum is {max_rows}")]
    TooManyRows { rows: usize, max_rows: usize },

    /// Fatal delimiter/quote mismatch
    #[error("CSV parsing error: {0}")]
    Syntax(String),

    /// The isolated parse unit terminated abnormally
    #[error("Parse worker failed: {0}")]
    Channel(String),

    /// Catch-all
    #[error("{0}")]
    Unknown(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl From<String> for DataError {
    fn from(s: String) -> Self {
        DataError::Unknown(s)
    }
}

impl From<&str> for DataError {
    fn from(s: &str) -> Self {
        DataError::Unknown(s.to_string())
    }
}
