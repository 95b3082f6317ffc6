//! Settings file (`slidegen.toml`).
//!
//! ```toml
//! [meta]
//! locale = "it-IT"
//! title = "Monthly report"
//! author = "Operations"
//!
//! [plot]
//! width = 800
//! height = 600
//! line_width = 1.5
//! background = "#ffffff"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slidegen_chart::PlotOptions;
use slidegen_pptx::DeckMeta;
use thiserror::Error;

/// File names looked up by [`Settings::discover`], in order
pub const SETTINGS_CANDIDATES: [&str; 2] = ["slidegen.toml", ".slidegen.toml"];

/// Errors raised while loading an explicit settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file does not exist
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Settings file could not be read
    #[error("Failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid TOML or has unknown keys
    #[error("Failed to parse settings {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Document properties of generated decks
    pub meta: DeckMeta,
    /// Plot appearance
    pub plot: PlotSettings,
}

/// Plot appearance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotSettings {
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
    /// Data line width in pixels
    pub line_width: f32,
    /// Background color
    pub background: String,
    /// Data line color
    pub line_color: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        let defaults = PlotOptions::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            line_width: defaults.line_width,
            background: defaults.background,
            line_color: defaults.line_color,
        }
    }
}

impl PlotSettings {
    /// Options for the chart renderer
    pub fn to_options(&self) -> PlotOptions {
        PlotOptions::new()
            .with_size(self.width, self.height)
            .with_line_width(self.line_width)
            .with_background(self.background.clone())
            .with_line_color(self.line_color.clone())
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load an explicit settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find a settings file in `dir`, falling back to defaults
    ///
    /// Candidates that fail to parse are skipped with a warning.
    pub fn discover(dir: impl AsRef<Path>) -> (Self, Option<PathBuf>) {
        for candidate in SETTINGS_CANDIDATES {
            let path = dir.as_ref().join(candidate);
            if !path.is_file() {
                continue;
            }
            match Self::load(&path) {
                Ok(settings) => return (settings, Some(path)),
                Err(e) => log::warn!("Ignoring settings: {}", e),
            }
        }
        (Self::default(), None)
    }
}
