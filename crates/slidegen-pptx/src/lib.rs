//! # slidegen-pptx
//!
//! In-memory PowerPoint decks and their serialization to PPTX packages.
//!
//! A [`Presentation`] owns an ordered list of [`Slide`]s. Each slide is based
//! on one of the built-in [`SlideLayout`]s, carries text for its placeholders
//! and may hold free shapes (text boxes and pictures).
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidegen_pptx::{Presentation, SlideLayout};
//!
//! let mut deck = Presentation::new();
//! let slide = deck.add_slide(SlideLayout::TitleAndContent);
//! slide.set_title("Agenda")?;
//! slide.body_mut()?.add_paragraph("Results", 0)?;
//! deck.save("agenda.pptx")?;
//! ```

pub mod error;
pub mod layout;
pub mod media;
pub mod presentation;
pub mod slide;
pub mod writer;

// Re-exports
pub use error::{PptxError, Result};
pub use layout::{PlaceholderType, SlideLayout};
pub use media::Image;
pub use presentation::{DeckMeta, Presentation};
pub use slide::{check_text, Frame, Paragraph, Shape, Slide, TextFrame, MAX_PARAGRAPH_LEVEL};
pub use writer::PptxWriter;

/// PPTX-related constants
pub mod constants {
    /// Default slide width in EMU (914400 EMU = 1 inch, standard 10" width)
    pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// Default slide height in EMU (standard 7.5" height for 4:3)
    pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationships namespace (`.rels` parts)
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Convert inches to EMU
    pub fn inches(value: f64) -> i64 {
        (value * EMU_PER_INCH as f64).round() as i64
    }
}
