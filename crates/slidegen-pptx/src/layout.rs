//! Slide layouts shipped with every generated deck.
//!
//! The built-in master carries three layouts. Each slide references exactly
//! one of them, and the layout decides which placeholders the slide exposes.

use serde::{Deserialize, Serialize};

/// Layout templates available to slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayout {
    /// Centered title with a subtitle region
    Title,

    /// Title plus a bulleted body placeholder
    TitleAndContent,

    /// Title only; the rest of the slide is free for shapes
    TitleOnly,
}

/// Types of placeholders used by the built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderType {
    /// Title placeholder
    Title,

    /// Center title (for title slides)
    CenterTitle,

    /// Subtitle
    Subtitle,

    /// Body content
    Body,
}

impl PlaceholderType {
    /// Get the OOXML `type` attribute value, if the placeholder has one
    pub fn ooxml_type(&self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title"),
            Self::CenterTitle => Some("ctrTitle"),
            Self::Subtitle => Some("subTitle"),
            Self::Body => None,
        }
    }

    /// Human-readable name used in shape names and diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Title | Self::CenterTitle => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body => "Content Placeholder",
        }
    }
}

/// Information about a placeholder in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderInfo {
    /// Placeholder index (idx attribute)
    pub index: u32,

    /// Placeholder type
    pub placeholder_type: PlaceholderType,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),
}

const TITLE_SLIDE_PLACEHOLDERS: &[PlaceholderInfo] = &[
    PlaceholderInfo {
        index: 0,
        placeholder_type: PlaceholderType::CenterTitle,
        position: (685_800, 2_130_425),
        size: (7_772_400, 1_470_025),
    },
    PlaceholderInfo {
        index: 1,
        placeholder_type: PlaceholderType::Subtitle,
        position: (1_371_600, 3_886_200),
        size: (6_400_800, 1_752_600),
    },
];

const TITLE_AND_CONTENT_PLACEHOLDERS: &[PlaceholderInfo] = &[
    PlaceholderInfo {
        index: 0,
        placeholder_type: PlaceholderType::Title,
        position: (457_200, 274_638),
        size: (8_229_600, 1_143_000),
    },
    PlaceholderInfo {
        index: 1,
        placeholder_type: PlaceholderType::Body,
        position: (457_200, 1_600_200),
        size: (8_229_600, 4_525_963),
    },
];

const TITLE_ONLY_PLACEHOLDERS: &[PlaceholderInfo] = &[PlaceholderInfo {
    index: 0,
    placeholder_type: PlaceholderType::Title,
    position: (457_200, 274_638),
    size: (8_229_600, 1_143_000),
}];

impl SlideLayout {
    /// Every layout, in `slideLayoutN.xml` order
    pub const ALL: [SlideLayout; 3] = [Self::Title, Self::TitleAndContent, Self::TitleOnly];

    /// Layout index (1-based, matching slideLayoutN.xml)
    pub fn index(&self) -> u32 {
        match self {
            Self::Title => 1,
            Self::TitleAndContent => 2,
            Self::TitleOnly => 3,
        }
    }

    /// Layout name as shown by presentation software
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::TitleOnly => "Title Only",
        }
    }

    /// Get the OOXML type attribute value
    pub fn ooxml_type(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TitleAndContent => "obj",
            Self::TitleOnly => "titleOnly",
        }
    }

    /// Placeholders defined by this layout
    pub fn placeholders(&self) -> &'static [PlaceholderInfo] {
        match self {
            Self::Title => TITLE_SLIDE_PLACEHOLDERS,
            Self::TitleAndContent => TITLE_AND_CONTENT_PLACEHOLDERS,
            Self::TitleOnly => TITLE_ONLY_PLACEHOLDERS,
        }
    }

    /// Get the title placeholder
    pub fn title_placeholder(&self) -> &'static PlaceholderInfo {
        // Every built-in layout starts with its title at idx 0
        &self.placeholders()[0]
    }

    /// Get a placeholder by its idx attribute
    pub fn placeholder(&self, index: u32) -> Option<&'static PlaceholderInfo> {
        self.placeholders().iter().find(|p| p.index == index)
    }

    /// Check if this layout has a specific placeholder type
    pub fn has_placeholder(&self, placeholder_type: PlaceholderType) -> bool {
        self.placeholders()
            .iter()
            .any(|p| p.placeholder_type == placeholder_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_indices_are_sequential() {
        for (i, layout) in SlideLayout::ALL.iter().enumerate() {
            assert_eq!(layout.index() as usize, i + 1);
        }
    }

    #[test]
    fn test_layout_ooxml_type() {
        assert_eq!(SlideLayout::Title.ooxml_type(), "title");
        assert_eq!(SlideLayout::TitleAndContent.ooxml_type(), "obj");
        assert_eq!(SlideLayout::TitleOnly.ooxml_type(), "titleOnly");
    }

    #[test]
    fn test_placeholder_type_ooxml() {
        assert_eq!(PlaceholderType::CenterTitle.ooxml_type(), Some("ctrTitle"));
        assert_eq!(PlaceholderType::Subtitle.ooxml_type(), Some("subTitle"));
        assert_eq!(PlaceholderType::Body.ooxml_type(), None);
    }

    #[test]
    fn test_layout_placeholders() {
        let title = SlideLayout::Title;
        assert_eq!(
            title.title_placeholder().placeholder_type,
            PlaceholderType::CenterTitle
        );
        assert!(title.has_placeholder(PlaceholderType::Subtitle));
        assert!(!title.has_placeholder(PlaceholderType::Body));

        let content = SlideLayout::TitleAndContent;
        assert_eq!(
            content.placeholder(1).map(|p| p.placeholder_type),
            Some(PlaceholderType::Body)
        );

        assert!(SlideLayout::TitleOnly.placeholder(1).is_none());
    }
}
