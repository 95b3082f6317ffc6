//! Plot appearance options.

use crate::error::{RenderError, RenderResult};

/// Options for chart rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Stroke width of the data line, in pixels
    pub line_width: f32,
    /// Background color (CSS color string, e.g., "white", "#ffffff")
    pub background: String,
    /// Data line color
    pub line_color: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            line_width: 2.0,
            background: "white".to_string(),
            line_color: "#1f77b4".to_string(),
        }
    }
}

impl PlotOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set line width
    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set background color
    pub fn with_background(mut self, bg: impl Into<String>) -> Self {
        self.background = bg.into();
        self
    }

    /// Set data line color
    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }

    /// Check that the plot area is large enough to draw into
    pub fn validate(&self) -> RenderResult<()> {
        if self.width < MIN_SIZE || self.height < MIN_SIZE {
            return Err(RenderError::InvalidOptions(format!(
                "plot size {}x{} is below the {}x{} minimum",
                self.width, self.height, MIN_SIZE, MIN_SIZE
            )));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(RenderError::InvalidOptions(format!(
                "line width must be positive, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

/// Smallest width or height that leaves room for the axes
pub const MIN_SIZE: u32 = 160;
