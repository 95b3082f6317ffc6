//! The in-memory deck.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU};
use crate::error::Result;
use crate::layout::SlideLayout;
use crate::slide::Slide;
use crate::writer::PptxWriter;

/// Document properties written to `docProps/core.xml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckMeta {
    /// Locale code (e.g., "en-US", "it-IT")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Presentation title
    #[serde(default)]
    pub title: Option<String>,

    /// Presentation author
    #[serde(default)]
    pub author: Option<String>,
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for DeckMeta {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            title: None,
            author: None,
        }
    }
}

/// An ordered collection of slides that can be saved as a PPTX package
#[derive(Debug, Clone)]
pub struct Presentation {
    meta: DeckMeta,
    slide_size: (i64, i64),
    slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// Create an empty 4:3 presentation
    pub fn new() -> Self {
        Self {
            meta: DeckMeta::default(),
            slide_size: (DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU),
            slides: Vec::new(),
        }
    }

    /// Set document properties
    pub fn with_meta(mut self, meta: DeckMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the slide size in EMU
    pub fn with_slide_size(mut self, width: i64, height: i64) -> Self {
        self.slide_size = (width, height);
        self
    }

    /// Append a slide based on `layout` and return it for filling in
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        self.slides.push(Slide::new(layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Append an already-built slide
    pub fn push_slide(&mut self, slide: Slide) -> usize {
        self.slides.push(slide);
        self.slides.len() - 1
    }

    /// Slides in order
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at a 0-based position
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if the deck has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Document properties
    pub fn meta(&self) -> &DeckMeta {
        &self.meta
    }

    /// Slide size (width, height) in EMU
    pub fn slide_size(&self) -> (i64, i64) {
        self.slide_size
    }

    /// Serialize the deck to PPTX bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PptxWriter::new(self).generate()
    }

    /// Serialize the deck and write it to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
