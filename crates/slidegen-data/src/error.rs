//! Error types for the data loader.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading a data file
#[derive(Debug, Error)]
pub enum DataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be parsed (e.g. inconsistent column count)
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// A cell in one of the used columns is not a number
    #[error("Row {row}, column {column}: '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: usize,
        value: String,
    },

    /// A row has fewer columns than required
    #[error("Row {row}: expected at least 2 columns, found {found}")]
    TooFewColumns { row: usize, found: usize },

    /// No data rows at all
    #[error("No data rows")]
    Empty,
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Malformed(err.to_string())
    }
}
