//! Slide data structures and content types.
//!
//! A [`Slide`] is the in-memory counterpart of one `slideN.xml` part: the
//! layout it uses, the text of its placeholders and any free shapes placed
//! on top of it.

use crate::error::{PptxError, Result};
use crate::layout::{PlaceholderType, SlideLayout};
use crate::media::Image;

/// Deepest paragraph level PresentationML accepts (`a:pPr/@lvl`)
pub const MAX_PARAGRAPH_LEVEL: u32 = 8;

/// A single slide in a presentation
#[derive(Debug, Clone)]
pub struct Slide {
    /// Layout the slide is based on
    layout: SlideLayout,

    /// Text of the title placeholder
    title: Option<String>,

    /// Text of the secondary placeholder (subtitle or body), when the layout has one
    body: Option<TextFrame>,

    /// Free shapes, in z-order
    shapes: Vec<Shape>,
}

/// Paragraphs of a placeholder or text box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

/// A paragraph with an indentation level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,

    /// Nesting level (0 = top level)
    pub level: u32,
}

/// Position and size of a shape, in EMU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Free shapes placed on a slide
#[derive(Debug, Clone)]
pub enum Shape {
    /// Text box with its own text frame
    TextBox { frame: Frame, text: TextFrame },

    /// Embedded picture
    Picture { frame: Frame, image: Image },
}

impl Frame {
    /// Create a frame from position and size
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl Paragraph {
    /// Create a top-level paragraph
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
        }
    }
}

/// Reject characters that XML 1.0 cannot carry (C0 controls other than tab,
/// line feed and carriage return, U+FFFE and U+FFFF)
pub fn check_text(text: &str) -> Result<()> {
    let invalid = text.chars().find(|&c| {
        matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
        )
    });
    match invalid {
        Some(c) => Err(PptxError::invalid_text(text, c)),
        None => Ok(()),
    }
}

impl TextFrame {
    /// Create an empty text frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text frame holding `text`, one paragraph per line
    pub fn from_text(text: &str) -> Result<Self> {
        check_text(text)?;
        Ok(Self::from_lines(text))
    }

    pub(crate) fn from_lines(text: &str) -> Self {
        Self {
            paragraphs: text.split('\n').map(Paragraph::plain).collect(),
        }
    }

    /// Replace the content with `text`; each line becomes a paragraph
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        *self = Self::from_text(text)?;
        Ok(())
    }

    /// Append a paragraph at the given level
    pub fn add_paragraph(&mut self, text: impl Into<String>, level: u32) -> Result<()> {
        let text = text.into();
        check_text(&text)?;
        if level > MAX_PARAGRAPH_LEVEL {
            return Err(PptxError::InvalidLevel {
                level,
                max: MAX_PARAGRAPH_LEVEL,
            });
        }
        self.paragraphs.push(Paragraph { text, level });
        Ok(())
    }

    /// Paragraphs in order
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All paragraph text joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the frame has no paragraphs
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl Slide {
    /// Create an empty slide based on a layout
    pub fn new(layout: SlideLayout) -> Self {
        let has_body = layout.placeholder(1).is_some();
        Self {
            layout,
            title: None,
            body: has_body.then(TextFrame::new),
            shapes: Vec::new(),
        }
    }

    /// Layout the slide is based on
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Set the title placeholder text
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        check_text(&title)?;
        self.title = Some(title);
        Ok(())
    }

    /// Title placeholder text
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Text frame of the secondary placeholder (subtitle or body)
    pub fn body(&self) -> Option<&TextFrame> {
        self.body.as_ref()
    }

    /// Mutable text frame of the secondary placeholder
    pub fn body_mut(&mut self) -> Result<&mut TextFrame> {
        let layout = self.layout;
        self.body.as_mut().ok_or_else(|| {
            PptxError::missing_placeholder(PlaceholderType::Body.display_name(), layout.name())
        })
    }

    /// Add a text box holding `text`
    pub fn add_textbox(&mut self, frame: Frame, text: &str) -> Result<()> {
        let text = TextFrame::from_text(text)?;
        self.shapes.push(Shape::TextBox { frame, text });
        Ok(())
    }

    /// Add a picture at a position, sized to `height` with the aspect ratio kept
    pub fn add_picture(&mut self, image: Image, left: i64, top: i64, height: i64) -> Frame {
        let frame = Frame::new(left, top, image.width_for_height(height), height);
        self.shapes.push(Shape::Picture { frame, image });
        frame
    }

    /// Free shapes, in z-order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Pictures on this slide, in z-order
    pub fn pictures(&self) -> impl Iterator<Item = (&Frame, &Image)> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Picture { frame, image } => Some((frame, image)),
            Shape::TextBox { .. } => None,
        })
    }

    /// Check if this is a title slide
    pub fn is_title_slide(&self) -> bool {
        self.layout == SlideLayout::Title
    }
}
