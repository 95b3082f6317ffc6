//! Chart rendering errors.

use thiserror::Error;

/// Errors that can occur while rendering a chart
#[derive(Debug, Error)]
pub enum RenderError {
    /// The series cannot be plotted (empty, mismatched or non-finite)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Plot options are out of range
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Rendering failed during execution
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;
