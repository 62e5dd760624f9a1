use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur when the
/// report generator gathers, lays out, or exports data.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as creating the export directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization of input tables fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when a table's rows do not match its declared column list.
    #[error("ragged table: row {row} has {found} values, expected {expected}")]
    RaggedTable {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Raised when the data source cannot produce a result for a query.
    /// Recovered per query by the orchestrator; fatal only at connect time.
    #[error("query '{query}' failed: {reason}")]
    Source { query: String, reason: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
}
