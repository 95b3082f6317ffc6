//! Error types for slide validation and deck generation.

use std::path::PathBuf;

use slidegen_chart::RenderError;
use slidegen_pptx::PptxError;
use thiserror::Error;

use crate::spec::SlideKind;

/// Errors raised while validating or building a single slide
#[derive(Debug, Error)]
pub enum SlideError {
    /// The `type` discriminator names no known slide variant
    #[error("\"{0}\" is not a valid slide type")]
    UnknownSlideType(String),

    /// A required property is absent
    #[error("missing property \"{0}\"")]
    MissingField(String),

    /// A property the variant does not accept
    #[error("unexpected property \"{field}\" for a {kind} slide")]
    UnexpectedField { kind: SlideKind, field: String },

    /// A property has the wrong JSON kind
    #[error("property \"{field}\" must be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// A file the slide depends on could not be loaded
    #[error("failed to load \"{path}\": {reason}")]
    ResourceLoad { path: String, reason: String },

    /// The document builder rejected the content
    #[error("{0}")]
    Render(#[from] PptxError),

    /// The plot could not be rasterized
    #[error("{0}")]
    Chart(#[from] RenderError),
}

impl SlideError {
    /// Create a resource load error
    pub fn resource_load(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    /// Get the diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownSlideType(_) => "SLIDE001",
            Self::MissingField(_) => "SLIDE002",
            Self::UnexpectedField { .. } => "SLIDE003",
            Self::TypeMismatch { .. } => "SLIDE004",
            Self::ResourceLoad { .. } => "SLIDE005",
            Self::Render(_) => "SLIDE006",
            Self::Chart(_) => "SLIDE007",
        }
    }

    /// Short description of the failure class, used in log lines
    pub fn summary(&self) -> &'static str {
        match self {
            Self::UnknownSlideType(_) | Self::UnexpectedField { .. } | Self::TypeMismatch { .. } => {
                "is not in a valid format"
            }
            Self::MissingField(_) => "is missing a property",
            Self::ResourceLoad { .. } => "has a file dependency which could not be loaded",
            Self::Render(_) | Self::Chart(_) => "could not be rendered",
        }
    }
}

/// Errors that abort a whole generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration file could not be read
    #[error("Couldn't load \"{}\"! Please check if it's a valid path: {source}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has the wrong shape
    #[error("Config file \"{}\" is not in a valid format! {reason}", .path.display())]
    ConfigFormat { path: PathBuf, reason: String },

    /// A slide failed validation or rendering (1-based index)
    #[error("Slide number {index} {}! {source}", .source.summary())]
    SlideFailed { index: usize, source: SlideError },

    /// The finished deck could not be written
    #[error("Couldn't save presentation to \"{}\"! {source}", .path.display())]
    OutputWrite { path: PathBuf, source: PptxError },
}

impl GenerateError {
    /// Get the diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigLoad { .. } => "GEN001",
            Self::ConfigFormat { .. } => "GEN002",
            Self::SlideFailed { .. } => "GEN003",
            Self::OutputWrite { .. } => "GEN004",
        }
    }

    /// The slide error behind a `SlideFailed`, if any
    pub fn slide_error(&self) -> Option<&SlideError> {
        match self {
            Self::SlideFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for slide operations
pub type SlideResult<T> = std::result::Result<T, SlideError>;

/// Result type for generation
pub type Result<T> = std::result::Result<T, GenerateError>;
