//! Line charts drawn as SVG documents.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::error::{RenderError, RenderResult};
use crate::options::PlotOptions;

// Plot area margins, in pixels
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 60.0;

const TICK_LENGTH: f64 = 5.0;
const TICK_TARGET: usize = 6;
const FONT_SIZE: f64 = 13.0;
// Upper bound on ticks per axis; a nice step yields far fewer
const MAX_TICKS: usize = 64;

/// An x/y line plot with axis labels
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    x: Vec<f64>,
    y: Vec<f64>,
    x_label: String,
    y_label: String,
}

/// Axis range with its tick positions
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    step: f64,
}

impl LineChart {
    /// Create a chart from paired values
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> RenderResult<Self> {
        if x.is_empty() {
            return Err(RenderError::InvalidData("series has no points".to_string()));
        }
        if x.len() != y.len() {
            return Err(RenderError::InvalidData(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }
        if let Some(v) = x.iter().chain(&y).find(|v| !v.is_finite()) {
            return Err(RenderError::InvalidData(format!(
                "non-finite value {}",
                v
            )));
        }
        Axis::fit(&x)?;
        Axis::fit(&y)?;

        Ok(Self {
            x,
            y,
            x_label: String::new(),
            y_label: String::new(),
        })
    }

    /// Set the axis labels
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the chart has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Horizontal axis label
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Vertical axis label
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Render the chart as an SVG document
    pub fn to_svg(&self, options: &PlotOptions) -> RenderResult<String> {
        options.validate()?;

        let width = options.width as f64;
        let height = options.height as f64;
        let left = MARGIN_LEFT;
        let right = width - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = height - MARGIN_BOTTOM;

        let x_axis = Axis::fit(&self.x)?;
        let y_axis = Axis::fit(&self.y)?;

        let px = |v: f64| left + (v - x_axis.min) / (x_axis.max - x_axis.min) * (right - left);
        let py = |v: f64| bottom - (v - y_axis.min) / (y_axis.max - y_axis.min) * (bottom - top);

        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = options.width,
            h = options.height
        );
        let _ = writeln!(
            svg,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            options.width,
            options.height,
            escape(options.background.as_str())
        );

        // Grid and tick labels
        let _ = writeln!(
            svg,
            r##"  <g stroke="#dddddd" stroke-width="1" fill="none">"##
        );
        for &t in &x_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}"/>"#,
                x = px(t)
            );
        }
        for &t in &y_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}"/>"#,
                y = py(t)
            );
        }
        let _ = writeln!(svg, "  </g>");

        let _ = writeln!(
            svg,
            r#"  <g font-family="sans-serif" font-size="{}" fill="black">"#,
            FONT_SIZE
        );
        for &t in &x_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                px(t),
                bottom + TICK_LENGTH + FONT_SIZE + 2.0,
                x_axis.label(t)
            );
        }
        for &t in &y_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                left - TICK_LENGTH - 3.0,
                py(t) + FONT_SIZE / 3.0,
                y_axis.label(t)
            );
        }

        // Axis titles
        let _ = writeln!(
            svg,
            r#"    <text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            (left + right) / 2.0,
            height - 12.0,
            escape(self.x_label.as_str())
        );
        let (cx, cy) = (18.0, (top + bottom) / 2.0);
        let _ = writeln!(
            svg,
            r#"    <text x="{cx:.2}" y="{cy:.2}" text-anchor="middle" transform="rotate(-90 {cx:.2} {cy:.2})">{}</text>"#,
            escape(self.y_label.as_str())
        );
        let _ = writeln!(svg, "  </g>");

        // Frame with ticks
        let _ = writeln!(
            svg,
            r#"  <g stroke="black" stroke-width="1" fill="none">"#
        );
        let _ = writeln!(
            svg,
            r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            left,
            top,
            right - left,
            bottom - top
        );
        for &t in &x_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#,
                bottom,
                bottom + TICK_LENGTH,
                x = px(t)
            );
        }
        for &t in &y_axis.ticks {
            let _ = writeln!(
                svg,
                r#"    <line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
                left - TICK_LENGTH,
                left,
                y = py(t)
            );
        }
        let _ = writeln!(svg, "  </g>");

        // Data
        let color = escape(options.line_color.as_str());
        if self.len() == 1 {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                px(self.x[0]),
                py(self.y[0]),
                options.line_width * 2.0,
                color
            );
        } else {
            let points: Vec<String> = self
                .x
                .iter()
                .zip(&self.y)
                .map(|(&x, &y)| format!("{:.2},{:.2}", px(x), py(y)))
                .collect();
            let _ = writeln!(
                svg,
                r#"  <polyline fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" points="{}"/>"#,
                color,
                options.line_width,
                points.join(" ")
            );
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl Axis {
    /// Fit an axis around the values, widened to round tick positions
    ///
    /// Fails when the widened range does not fit in an `f64`.
    pub fn fit(values: &[f64]) -> RenderResult<Self> {
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if !lo.is_finite() || !hi.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        if lo == hi {
            // Flat series: open a window around the value
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            lo -= pad;
            hi += pad;
        }

        let span = hi - lo;
        if !span.is_finite() {
            return Err(RenderError::InvalidData(format!(
                "range {} to {} is too wide to plot",
                lo, hi
            )));
        }

        let step = nice_step(span / TICK_TARGET as f64);
        let min = (lo / step).floor() * step;
        let max = (hi / step).ceil() * step;
        let count = (max - min) / step;
        if !(min.is_finite() && max.is_finite() && count.is_finite()) || count > MAX_TICKS as f64 {
            return Err(RenderError::InvalidData(format!(
                "range {} to {} is too wide to plot",
                lo, hi
            )));
        }

        let ticks = (0..=count.round() as usize)
            .map(|i| min + i as f64 * step)
            .collect();

        Ok(Self {
            min,
            max,
            ticks,
            step,
        })
    }

    /// Text for a tick value, with as many decimals as the step needs
    pub fn label(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10() - 1e-9).ceil().clamp(0.0, 6.0) as usize
        };
        // Adding 0.0 turns -0.0 into 0.0
        format!("{:.*}", decimals, value + 0.0)
    }
}

/// Round a raw step to 1, 2 or 5 times a power of ten
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
