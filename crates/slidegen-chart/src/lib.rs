//! # slidegen-chart
//!
//! Line charts for plot slides.
//!
//! A [`LineChart`] is drawn as an SVG document (axes, grid, tick labels and
//! axis titles) and rasterized to PNG by [`ChartRenderer`] with resvg.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidegen_chart::{ChartRenderer, LineChart, PlotOptions};
//!
//! let chart = LineChart::new(x, y)?.with_labels("time [s]", "speed [m/s]");
//! let png = ChartRenderer::new().render_png(&chart, &PlotOptions::default())?;
//! ```

pub mod error;
pub mod line;
pub mod options;
pub mod renderer;

// Re-exports
pub use error::{RenderError, RenderResult};
pub use line::{nice_step, Axis, LineChart};
pub use options::PlotOptions;
pub use renderer::ChartRenderer;
