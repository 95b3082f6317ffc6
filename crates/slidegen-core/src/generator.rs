//! Generation pipeline: configuration file in, PPTX file out.

use std::path::Path;

use log::info;
use serde_json::{Map, Value};
use slidegen_pptx::Presentation;

use crate::config::ConfigDocument;
use crate::error::{GenerateError, Result, SlideResult};
use crate::factory::{SlideFactory, SlideHandle};
use crate::settings::Settings;
use crate::spec::SlideSpec;

/// Deck generator
///
/// Owns the settings and the slide factory; each [`generate`](Self::generate)
/// call builds a fresh deck.
pub struct Generator {
    settings: Settings,
    factory: SlideFactory,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Generator {
    /// Create a generator, loading system fonts for plot labels
    pub fn new(settings: Settings) -> Self {
        let factory = SlideFactory::new(settings.plot.to_options());
        Self { settings, factory }
    }

    /// Create a generator with an existing factory
    pub fn with_factory(settings: Settings, factory: SlideFactory) -> Self {
        Self { settings, factory }
    }

    /// Active settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build a deck from a parsed configuration
    ///
    /// Stops at the first slide that fails; slide numbers in errors and log
    /// lines are 1-based.
    pub fn build_presentation(&self, config: ConfigDocument) -> Result<Presentation> {
        let mut deck = Presentation::new().with_meta(self.settings.meta.clone());

        for (i, object) in config.presentation.into_iter().enumerate() {
            let index = i + 1;
            self.build_slide(&mut deck, object)
                .map_err(|source| GenerateError::SlideFailed { index, source })?;
            info!("Slide number {} generated", index);
        }

        Ok(deck)
    }

    fn build_slide(
        &self,
        deck: &mut Presentation,
        object: Map<String, Value>,
    ) -> SlideResult<SlideHandle> {
        let spec = SlideSpec::from_object(object)?;
        self.factory.build(deck, spec)
    }

    /// Read `config_path`, build every slide and save the deck to `output_path`
    ///
    /// Nothing is written when any step fails.
    pub fn generate(
        &self,
        config_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<Presentation> {
        let config_path = config_path.as_ref();
        let output_path = output_path.as_ref();

        let config = ConfigDocument::load(config_path)?;
        info!("Configuration file loaded: \"{}\"", config_path.display());

        let deck = self.build_presentation(config)?;

        deck.save(output_path)
            .map_err(|source| GenerateError::OutputWrite {
                path: output_path.to_path_buf(),
                source,
            })?;
        info!("Presentation saved: \"{}\"", output_path.display());

        Ok(deck)
    }
}
