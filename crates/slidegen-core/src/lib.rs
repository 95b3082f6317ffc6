//! # slidegen-core
//!
//! Turns a JSON configuration into a PPTX deck.
//!
//! ## Pipeline
//!
//! 1. [`ConfigDocument`] checks the top-level shape of the file
//! 2. [`SlideSpec::from_object`] validates each slide object against its variant
//! 3. [`SlideFactory`] builds one slide per specification
//! 4. [`Generator`] drives the steps, logs progress and saves the deck
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidegen_core::{Generator, Settings};
//!
//! let generator = Generator::new(Settings::default());
//! generator.generate("report.json", "report.pptx")?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod settings;
pub mod spec;

// Re-exports
pub use config::ConfigDocument;
pub use error::{GenerateError, Result, SlideError, SlideResult};
pub use factory::{SlideFactory, SlideHandle};
pub use generator::Generator;
pub use settings::{PlotSettings, Settings, SettingsError, SETTINGS_CANDIDATES};
pub use spec::{ListEntry, PlotConfiguration, SlideKind, SlideSpec};
