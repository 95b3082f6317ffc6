//! SVG to PNG rasterization.

use std::sync::Arc;

use usvg::fontdb::Database;

use crate::error::{RenderError, RenderResult};
use crate::line::LineChart;
use crate::options::PlotOptions;

/// Rasterizes charts with resvg
///
/// # Example
///
/// ```ignore
/// use slidegen_chart::{ChartRenderer, LineChart, PlotOptions};
///
/// let renderer = ChartRenderer::new();
/// let chart = LineChart::new(vec![0.0, 1.0], vec![2.0, 3.0])?.with_labels("t", "v");
/// let png = renderer.render_png(&chart, &PlotOptions::default())?;
/// ```
#[derive(Clone)]
pub struct ChartRenderer {
    /// Font database for axis text, shared between clones
    fontdb: Arc<Database>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    /// Create a new renderer with system fonts loaded
    pub fn new() -> Self {
        let mut fontdb = Database::new();
        fontdb.load_system_fonts();

        if fontdb.is_empty() {
            log::warn!("No system fonts found, chart labels will not be rendered");
        }

        Self::with_fontdb(Arc::new(fontdb))
    }

    /// Create a renderer sharing an existing font database
    pub fn with_fontdb(fontdb: Arc<Database>) -> Self {
        Self { fontdb }
    }

    /// Create a renderer with an empty font database; labels are skipped
    pub fn without_fonts() -> Self {
        Self::with_fontdb(Arc::new(Database::new()))
    }

    /// Number of font faces available for text
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render a chart to SVG text
    pub fn render_svg(&self, chart: &LineChart, options: &PlotOptions) -> RenderResult<String> {
        chart.to_svg(options)
    }

    /// Render a chart to PNG bytes at the size given in `options`
    pub fn render_png(&self, chart: &LineChart, options: &PlotOptions) -> RenderResult<Vec<u8>> {
        let svg = chart.to_svg(options)?;
        log::debug!(
            "Rasterizing {}-point chart at {}x{}",
            chart.len(),
            options.width,
            options.height
        );
        self.svg_to_png(&svg, options)
    }

    /// Convert SVG string to PNG bytes using resvg
    fn svg_to_png(&self, svg: &str, options: &PlotOptions) -> RenderResult<Vec<u8>> {
        let tree = {
            let opts = usvg::Options {
                fontdb: Arc::clone(&self.fontdb),
                ..usvg::Options::default()
            };
            usvg::Tree::from_str(svg, &opts)
                .map_err(|e| RenderError::RenderFailed(format!("SVG parsing failed: {}", e)))?
        };

        let mut pixmap =
            tiny_skia::Pixmap::new(options.width, options.height).ok_or_else(|| {
                RenderError::RenderFailed(format!(
                    "Failed to create pixmap ({}x{})",
                    options.width, options.height
                ))
            })?;

        match parse_color(&options.background) {
            Some(color) => pixmap.fill(color),
            None => log::warn!(
                "Unrecognized background color '{}', leaving transparent",
                options.background
            ),
        }

        // The SVG is drawn at the target size already
        let scale_x = options.width as f32 / tree.size().width();
        let scale_y = options.height as f32 / tree.size().height();
        let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);

        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RenderError::RenderFailed(format!("PNG encoding failed: {}", e)))
    }
}

/// Parse a CSS color string to tiny_skia::Color
fn parse_color(color: &str) -> Option<tiny_skia::Color> {
    let color = color.trim().to_lowercase();

    // Named colors
    match color.as_str() {
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        "transparent" | "none" => return Some(tiny_skia::Color::TRANSPARENT),
        "lightgray" | "lightgrey" => return Some(tiny_skia::Color::from_rgba8(211, 211, 211, 255)),
        _ => {}
    }

    let hex = color.strip_prefix('#')?;
    let channel = |i: usize, width: usize| -> Option<u8> {
        let digits = hex.get(i * width..(i + 1) * width)?;
        let value = u8::from_str_radix(digits, 16).ok()?;
        // #RGB digits stand for doubled digits
        Some(if width == 1 { value * 17 } else { value })
    };

    match hex.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            channel(0, 1)?,
            channel(1, 1)?,
            channel(2, 1)?,
            255,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            255,
        )),
        8 => Some(tiny_skia::Color::from_rgba8(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            channel(3, 2)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> ChartRenderer {
        // No fonts keeps the tests independent of the host
        ChartRenderer::without_fonts()
    }

    fn png_size(png: &[u8]) -> (u32, u32) {
        // IHDR follows the 8-byte signature and the 8-byte chunk header
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[test]
    fn test_render_png() {
        let chart = LineChart::new(vec![0.0, 1.0, 2.0], vec![3.0, 1.0, 2.0])
            .unwrap()
            .with_labels("x", "y");

        let png = renderer()
            .render_png(&chart, &PlotOptions::default())
            .unwrap();

        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_size(&png), (640, 480));
    }

    #[test]
    fn test_render_png_custom_size() {
        let chart = LineChart::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let options = PlotOptions::new().with_size(320, 200).with_background("#f0f0f0");

        let png = renderer().render_png(&chart, &options).unwrap();
        assert_eq!(png_size(&png), (320, 200));
    }

    #[test]
    fn test_render_invalid_options() {
        let chart = LineChart::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let options = PlotOptions::new().with_size(0, 0);

        let result = renderer().render_png(&chart, &options);
        assert!(matches!(result, Err(RenderError::InvalidOptions(_))));
    }

    #[test]
    fn test_render_svg_matches_chart() {
        let chart = LineChart::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_labels("a", "b");
        let options = PlotOptions::default();

        assert_eq!(
            renderer().render_svg(&chart, &options).unwrap(),
            chart.to_svg(&options).unwrap()
        );
    }

    #[test]
    fn test_parse_color() {
        assert!(parse_color("white").is_some());
        assert!(parse_color("black").is_some());
        assert!(parse_color("#fff").is_some());
        assert!(parse_color("#ffffff").is_some());
        assert!(parse_color("#ffffff80").is_some());
        assert!(parse_color("chartreuse").is_none());
        assert!(parse_color("#12").is_none());
    }

    #[test]
    fn test_parse_short_hex_expands() {
        assert_eq!(
            parse_color("#f80"),
            Some(tiny_skia::Color::from_rgba8(255, 136, 0, 255))
        );
    }
}
