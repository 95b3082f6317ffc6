//! Slide-variant factory.
//!
//! Turns a validated [`SlideSpec`] into exactly one slide of the deck. Every
//! file the slide depends on is loaded, and the slide is fully assembled,
//! before it is appended; a failing slide leaves the deck untouched.

use std::path::Path;

use log::debug;
use slidegen_chart::{ChartRenderer, LineChart, PlotOptions};
use slidegen_pptx::constants::inches;
use slidegen_pptx::{Frame, Image, Presentation, Slide, SlideLayout};

use crate::error::{SlideError, SlideResult};
use crate::spec::{ListEntry, PlotConfiguration, SlideKind, SlideSpec};

/// Left edge of free content (text boxes, pictures), in inches
const CONTENT_LEFT_IN: f64 = 1.0;

/// Top edge of free content, in inches
const CONTENT_TOP_IN: f64 = 2.0;

/// Text box width and height, in inches
const TEXTBOX_SIZE_IN: f64 = 1.0;

/// Picture height, in inches; width follows the aspect ratio
const PICTURE_HEIGHT_IN: f64 = 5.0;

/// Reference to a slide appended by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideHandle {
    /// Position in the deck (0-based)
    pub index: usize,
    /// Variant the slide was built from
    pub kind: SlideKind,
}

/// Builds slides from specifications
#[derive(Clone)]
pub struct SlideFactory {
    renderer: ChartRenderer,
    plot: PlotOptions,
}

impl Default for SlideFactory {
    fn default() -> Self {
        Self::new(PlotOptions::default())
    }
}

impl SlideFactory {
    /// Create a factory rendering plots with `plot` options
    pub fn new(plot: PlotOptions) -> Self {
        Self::with_renderer(ChartRenderer::new(), plot)
    }

    /// Create a factory with an existing chart renderer
    pub fn with_renderer(renderer: ChartRenderer, plot: PlotOptions) -> Self {
        Self { renderer, plot }
    }

    /// Plot appearance used for plot slides
    pub fn plot_options(&self) -> &PlotOptions {
        &self.plot
    }

    /// Layout used for a slide variant
    pub fn layout_for(kind: SlideKind) -> SlideLayout {
        match kind {
            SlideKind::Title => SlideLayout::Title,
            SlideKind::List => SlideLayout::TitleAndContent,
            SlideKind::Text | SlideKind::Picture | SlideKind::Plot => SlideLayout::TitleOnly,
        }
    }

    /// Build one slide and append it to the deck
    pub fn build(&self, deck: &mut Presentation, spec: SlideSpec) -> SlideResult<SlideHandle> {
        let kind = spec.kind();
        let mut slide = Slide::new(Self::layout_for(kind));

        match spec {
            SlideSpec::Title { title, content } => {
                slide.set_title(title)?;
                slide.body_mut()?.set_text(&content)?;
            }
            SlideSpec::Text { title, content } => {
                slide.set_title(title)?;
                slide.add_textbox(
                    Frame::new(
                        inches(CONTENT_LEFT_IN),
                        inches(CONTENT_TOP_IN),
                        inches(TEXTBOX_SIZE_IN),
                        inches(TEXTBOX_SIZE_IN),
                    ),
                    &content,
                )?;
            }
            SlideSpec::List { title, content } => {
                slide.set_title(title)?;
                add_list(&mut slide, content)?;
            }
            SlideSpec::Picture { title, content } => {
                let image = load_image(&content)?;
                slide.set_title(title)?;
                place_picture(&mut slide, image);
            }
            SlideSpec::Plot {
                title,
                content,
                configuration,
            } => {
                let image = self.render_plot(&content, &configuration)?;
                slide.set_title(title)?;
                place_picture(&mut slide, image);
            }
        }

        let index = deck.push_slide(slide);
        Ok(SlideHandle { index, kind })
    }

    /// Load the data file and rasterize it as a line plot
    fn render_plot(&self, path: &Path, configuration: &PlotConfiguration) -> SlideResult<Image> {
        let display = path.display().to_string();
        let series =
            slidegen_data::read_xy(path).map_err(|e| SlideError::resource_load(&display, e))?;

        let chart = LineChart::new(series.x, series.y)
            .map_err(|e| SlideError::resource_load(&display, e))?
            .with_labels(&configuration.x_label, &configuration.y_label);

        debug!("Plotting {} points from {}", chart.len(), display);
        let png = self.renderer.render_png(&chart, &self.plot)?;
        Ok(Image::from_bytes(png)?)
    }
}

fn add_list(slide: &mut Slide, entries: Vec<ListEntry>) -> SlideResult<()> {
    let body = slide.body_mut()?;
    for entry in entries {
        body.add_paragraph(entry.text, entry.level)?;
    }
    Ok(())
}

fn load_image(path: &Path) -> SlideResult<Image> {
    Image::load(path).map_err(|e| SlideError::resource_load(path.display().to_string(), e))
}

fn place_picture(slide: &mut Slide, image: Image) {
    slide.add_picture(
        image,
        inches(CONTENT_LEFT_IN),
        inches(CONTENT_TOP_IN),
        inches(PICTURE_HEIGHT_IN),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegen_pptx::Shape;

    fn factory() -> SlideFactory {
        SlideFactory::with_renderer(ChartRenderer::without_fonts(), PlotOptions::default())
    }

    #[test]
    fn test_layout_for_kind() {
        assert_eq!(SlideFactory::layout_for(SlideKind::Title), SlideLayout::Title);
        assert_eq!(
            SlideFactory::layout_for(SlideKind::List),
            SlideLayout::TitleAndContent
        );
        assert_eq!(SlideFactory::layout_for(SlideKind::Plot), SlideLayout::TitleOnly);
    }

    #[test]
    fn test_build_title() {
        let mut deck = Presentation::new();
        let spec = SlideSpec::Title {
            title: "T".to_string(),
            content: "C".to_string(),
        };

        let handle = factory().build(&mut deck, spec).unwrap();
        assert_eq!(handle, SlideHandle { index: 0, kind: SlideKind::Title });

        let slide = deck.slide(0).unwrap();
        assert_eq!(slide.title(), Some("T"));
        assert_eq!(slide.body().map(|b| b.text()), Some("C".to_string()));
    }

    #[test]
    fn test_build_text_places_textbox() {
        let mut deck = Presentation::new();
        let spec = SlideSpec::Text {
            title: "Notes".to_string(),
            content: "hello".to_string(),
        };
        factory().build(&mut deck, spec).unwrap();

        match &deck.slide(0).unwrap().shapes()[0] {
            Shape::TextBox { frame, text } => {
                assert_eq!(*frame, Frame::new(914_400, 1_828_800, 914_400, 914_400));
                assert_eq!(text.text(), "hello");
            }
            other => panic!("Expected text box, got {:?}", other),
        }
    }

    #[test]
    fn test_build_list_levels() {
        let mut deck = Presentation::new();
        let spec = SlideSpec::List {
            title: "Agenda".to_string(),
            content: vec![
                ListEntry { level: 0, text: "a".to_string() },
                ListEntry { level: 1, text: "b".to_string() },
            ],
        };
        factory().build(&mut deck, spec).unwrap();

        let body = deck.slide(0).unwrap().body().unwrap();
        let levels: Vec<u32> = body.paragraphs().iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![0, 1]);
        assert_eq!(body.text(), "a\nb");
    }

    #[test]
    fn test_list_level_too_deep_leaves_deck_untouched() {
        let mut deck = Presentation::new();
        let spec = SlideSpec::List {
            title: String::new(),
            content: vec![ListEntry { level: 9, text: "deep".to_string() }],
        };

        let err = factory().build(&mut deck, spec).unwrap_err();
        assert!(matches!(err, SlideError::Render(_)));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_missing_picture_is_resource_error() {
        let mut deck = Presentation::new();
        let spec = SlideSpec::Picture {
            title: "Logo".to_string(),
            content: "/nonexistent/logo.png".into(),
        };

        let err = factory().build(&mut deck, spec).unwrap_err();
        match err {
            SlideError::ResourceLoad { path, .. } => assert_eq!(path, "/nonexistent/logo.png"),
            other => panic!("Expected ResourceLoad, got {:?}", other),
        }
        assert!(deck.is_empty());
    }

    #[test]
    fn test_build_plot_embeds_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "# x;y\n0;0\n1;1\n2;4\n").unwrap();

        let mut deck = Presentation::new();
        let spec = SlideSpec::Plot {
            title: "Growth".to_string(),
            content: path,
            configuration: PlotConfiguration {
                x_label: "x".to_string(),
                y_label: "y".to_string(),
            },
        };
        factory().build(&mut deck, spec).unwrap();

        let (frame, image) = deck.slide(0).unwrap().pictures().next().unwrap();
        assert_eq!(image.extension(), "png");
        assert_eq!(image.dimensions_px(), (640, 480));
        assert_eq!(frame.height, inches(5.0));
        assert_eq!(frame.width, inches(5.0) * 4 / 3);
    }

    #[test]
    fn test_plot_with_bad_data_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "0;zero\n").unwrap();

        let mut deck = Presentation::new();
        let spec = SlideSpec::Plot {
            title: String::new(),
            content: path,
            configuration: PlotConfiguration {
                x_label: "x".to_string(),
                y_label: "y".to_string(),
            },
        };

        let err = factory().build(&mut deck, spec).unwrap_err();
        assert!(matches!(err, SlideError::ResourceLoad { .. }));
    }

    #[test]
    fn test_plot_with_unplottable_range_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            ("wide.csv", "0;-1e308\n1;1e308\n"),
            ("max.csv", "0;1.7976931348623157e308\n"),
        ];
        for (name, data) in files {
            let path = dir.path().join(name);
            std::fs::write(&path, data).unwrap();

            let mut deck = Presentation::new();
            let spec = SlideSpec::Plot {
                title: String::new(),
                content: path,
                configuration: PlotConfiguration {
                    x_label: "x".to_string(),
                    y_label: "y".to_string(),
                },
            };

            let err = factory().build(&mut deck, spec).unwrap_err();
            assert!(matches!(err, SlideError::ResourceLoad { .. }), "{}: {:?}", name, err);
            assert!(deck.is_empty());
        }
    }
}
