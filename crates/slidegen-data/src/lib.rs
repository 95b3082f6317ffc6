//! # slidegen-data
//!
//! Loads delimited numeric files for plot slides.
//!
//! ## Format
//!
//! - Fields separated by `;`, no header row
//! - Lines starting with `#` and blank lines are ignored
//! - Column 0 is x, column 1 is y; further columns are ignored
//!
//! ## Example
//!
//! ```rust,ignore
//! let series = slidegen_data::read_xy("measurements.csv")?;
//! assert_eq!(series.x.len(), series.y.len());
//! ```

pub mod delimited;
pub mod error;

use std::path::Path;

// Re-exports
pub use delimited::{DelimitedOptions, DelimitedSource};
pub use error::{DataError, Result};

/// Paired x/y values of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct XySeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl XySeries {
    /// Build a series from string records (column 0 = x, column 1 = y)
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(DataError::Empty);
        }

        let mut columns = delimited::numeric_columns(rows, &[0, 1])?.into_iter();
        let x = columns.next().unwrap_or_default();
        let y = columns.next().unwrap_or_default();
        Ok(Self { x, y })
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Read an x/y series from a semicolon-delimited file
pub fn read_xy(path: impl AsRef<Path>) -> Result<XySeries> {
    read_xy_with_options(path, DelimitedOptions::default())
}

/// Read an x/y series with custom parsing options
pub fn read_xy_with_options(path: impl AsRef<Path>, options: DelimitedOptions) -> Result<XySeries> {
    let source = DelimitedSource::with_options(path, options)?;
    XySeries::from_rows(&source.read_all()?)
}
