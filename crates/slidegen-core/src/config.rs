//! Configuration document: `{ "presentation": [ <slide>, ... ] }`.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GenerateError, Result};

/// Parsed configuration file
///
/// Only the top-level shape is checked here; each slide object is validated
/// on its own when the deck is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Slide specifications, in deck order
    pub presentation: Vec<Map<String, Value>>,
}

impl ConfigDocument {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GenerateError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content).map_err(|e| GenerateError::ConfigFormat {
            path: path.to_path_buf(),
            reason: describe(&e),
        })
    }

    /// Number of slide specifications
    pub fn len(&self) -> usize {
        self.presentation.len()
    }

    /// Check if the configuration lists no slides
    pub fn is_empty(&self) -> bool {
        self.presentation.is_empty()
    }
}

fn describe(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match err.classify() {
        Category::Data => format!("unexpected shape: {}", err),
        Category::Io | Category::Syntax | Category::Eof => format!("invalid JSON: {}", err),
    }
}
