//! Error types for deck building and PPTX serialization.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur while building or saving a deck
#[derive(Error, Debug)]
pub enum PptxError {
    /// Layout does not provide the requested placeholder
    #[error("Missing placeholder '{placeholder}' in layout {layout}")]
    MissingPlaceholder { placeholder: String, layout: String },

    /// Paragraph indentation level outside what PresentationML allows
    #[error("Invalid paragraph level {level}: levels range from 0 to {max}")]
    InvalidLevel { level: u32, max: u32 },

    /// Text holds a character XML 1.0 cannot represent
    #[error("Invalid character {} in text \"{}\"", .character.escape_unicode(), .text.escape_debug())]
    InvalidText { text: String, character: char },

    /// Picture could not be read or decoded
    #[error("Image error for '{path}': {reason}")]
    ImageError { path: String, reason: String },

    /// Picture decoded fine but cannot be embedded in a package
    #[error("Unsupported image format: {format}")]
    UnsupportedImage { format: String },

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create a missing placeholder error
    pub fn missing_placeholder(placeholder: impl Into<String>, layout: impl Into<String>) -> Self {
        Self::MissingPlaceholder {
            placeholder: placeholder.into(),
            layout: layout.into(),
        }
    }

    /// Create an invalid text error
    pub fn invalid_text(text: impl Into<String>, character: char) -> Self {
        Self::InvalidText {
            text: text.into(),
            character,
        }
    }

    /// Create an image error
    pub fn image_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported image error
    pub fn unsupported_image(format: impl Into<String>) -> Self {
        Self::UnsupportedImage {
            format: format.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPlaceholder { .. } => "PPTX001",
            Self::InvalidLevel { .. } => "PPTX002",
            Self::ImageError { .. } => "PPTX003",
            Self::UnsupportedImage { .. } => "PPTX004",
            Self::ZipError(_) => "PPTX005",
            Self::IoError(_) => "PPTX006",
            Self::InvalidText { .. } => "PPTX007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::missing_placeholder("body", "Title Only");
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("body"));
        assert!(err.to_string().contains("Title Only"));

        let err = PptxError::InvalidLevel { level: 12, max: 8 };
        assert_eq!(err.code(), "PPTX002");
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_image_error_display() {
        let err = PptxError::image_error("chart.png", "truncated stream");
        assert!(err.to_string().contains("chart.png"));
        assert!(err.to_string().contains("truncated stream"));

        let err = PptxError::unsupported_image("WebP");
        assert_eq!(err.code(), "PPTX004");
    }

    #[test]
    fn test_invalid_text_display() {
        let err = PptxError::invalid_text("a\u{1}b", '\u{1}');
        assert_eq!(err.code(), "PPTX007");
        assert_eq!(err.to_string(), "Invalid character \\u{1} in text \"a\\u{1}b\"");
    }
}
