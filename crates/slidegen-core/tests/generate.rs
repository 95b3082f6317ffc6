//! End-to-end tests: JSON configuration file to PPTX package

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use slidegen_chart::ChartRenderer;
use slidegen_core::{GenerateError, Generator, Settings, SlideError, SlideFactory};
use slidegen_pptx::{PptxError, SlideLayout};
use zip::ZipArchive;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([0, 128, 0]))
            .save(&path)
            .unwrap();
        path
    }
}

fn generator() -> Generator {
    let settings = Settings::default();
    let factory =
        SlideFactory::with_renderer(ChartRenderer::without_fonts(), settings.plot.to_options());
    Generator::with_factory(settings, factory)
}

fn read_part(pptx: &Path, name: &str) -> String {
    let bytes = fs::read(pptx).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

/// JSON string literal for a path
fn json_path(path: &Path) -> String {
    serde_json::to_string(&path.display().to_string()).unwrap()
}

#[test]
fn test_all_variants_in_order() {
    let ws = Workspace::new();
    let picture = ws.write_png("logo.png", 200, 100);
    let data = ws.write("data.csv", "# t;v\n0;1\n1;3\n2;2\n");
    let config = ws.write(
        "deck.json",
        &format!(
            r#"{{"presentation": [
                {{"type": "title", "title": "Report", "content": "Q3"}},
                {{"type": "text", "title": "Intro", "content": "Hello"}},
                {{"type": "list", "title": "Agenda", "content": [
                    {{"level": 0, "text": "Results"}},
                    {{"level": 1, "text": "Revenue"}}
                ]}},
                {{"type": "picture", "title": "Logo", "content": {}}},
                {{"type": "plot", "title": "Trend", "content": {},
                  "configuration": {{"x-label": "t", "y-label": "v"}}}}
            ]}}"#,
            json_path(&picture),
            json_path(&data)
        ),
    );
    let output = ws.path("deck.pptx");

    let deck = generator().generate(&config, &output).unwrap();

    let layouts: Vec<SlideLayout> = deck.slides().iter().map(|s| s.layout()).collect();
    assert_eq!(
        layouts,
        vec![
            SlideLayout::Title,
            SlideLayout::TitleOnly,
            SlideLayout::TitleAndContent,
            SlideLayout::TitleOnly,
            SlideLayout::TitleOnly,
        ]
    );

    let presentation = read_part(&output, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 5);

    let rels = read_part(&output, "ppt/slides/_rels/slide5.xml.rels");
    assert!(rels.contains("slideLayout3.xml"));
    assert!(rels.contains("../media/image2.png"));
}

#[test]
fn test_title_round_trip() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[{"type":"title","title":"T","content":"C"}]}"#,
    );
    let output = ws.path("deck.pptx");

    let deck = generator().generate(&config, &output).unwrap();
    assert_eq!(deck.len(), 1);
    let slide = deck.slide(0).unwrap();
    assert_eq!(slide.title(), Some("T"));
    assert_eq!(slide.body().unwrap().text(), "C");

    let xml = read_part(&output, "ppt/slides/slide1.xml");
    assert!(xml.contains("<p:ph type=\"ctrTitle\"/>"));
    assert!(xml.contains("<a:t>T</a:t>"));
    assert!(xml.contains("<p:ph type=\"subTitle\" idx=\"1\"/>"));
    assert!(xml.contains("<a:t>C</a:t>"));
}

#[test]
fn test_list_levels_serialized() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[{"type":"list","title":"L",
            "content":[{"level":0,"text":"a"},{"level":1,"text":"b"}]}]}"#,
    );
    let output = ws.path("deck.pptx");

    let deck = generator().generate(&config, &output).unwrap();
    let body = deck.slide(0).unwrap().body().unwrap();
    let paragraphs: Vec<(u32, &str)> = body
        .paragraphs()
        .iter()
        .map(|p| (p.level, p.text.as_str()))
        .collect();
    assert_eq!(paragraphs, vec![(0, "a"), (1, "b")]);

    let xml = read_part(&output, "ppt/slides/slide1.xml");
    let a = xml.find("<a:t>a</a:t>").unwrap();
    let b = xml.find("<a:t>b</a:t>").unwrap();
    let lvl = xml.find("<a:pPr lvl=\"1\"/>").unwrap();
    assert!(a < lvl && lvl < b);
}

#[test]
fn test_missing_presentation_key() {
    let ws = Workspace::new();
    let config = ws.write("deck.json", r#"{"slides": []}"#);
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    assert!(matches!(err, GenerateError::ConfigFormat { .. }));
    assert!(!output.exists());
}

#[test]
fn test_invalid_json() {
    let ws = Workspace::new();
    let config = ws.write("deck.json", "{presentation: []}");
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    assert_eq!(err.code(), "GEN002");
    assert!(!output.exists());
}

#[test]
fn test_unknown_type_stops_run() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[
            {"type":"title","title":"ok"},
            {"type":"chart"},
            {"type":"picture","content":"/nonexistent.png"}
        ]}"#,
    );
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    match err {
        GenerateError::SlideFailed { index, source } => {
            assert_eq!(index, 2);
            assert!(matches!(source, SlideError::UnknownSlideType(ref t) if t == "chart"));
        }
        other => panic!("Expected SlideFailed, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_plot_missing_label() {
    let ws = Workspace::new();
    let data = ws.write("data.csv", "0;1\n1;2\n");
    let config = ws.write(
        "deck.json",
        &format!(
            r#"{{"presentation":[{{"type":"plot","content":{},"configuration":{{"y-label":"v"}}}}]}}"#,
            json_path(&data)
        ),
    );
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    let source = err.slide_error().unwrap();
    assert!(matches!(source, SlideError::MissingField(f) if f == "configuration.x-label"));
    assert!(!output.exists());
}

#[test]
fn test_picture_missing_file() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[{"type":"picture","title":"Logo","content":"missing.png"}]}"#,
    );
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    assert!(err.to_string().contains("file dependency"));
    assert!(matches!(
        err.slide_error(),
        Some(SlideError::ResourceLoad { .. })
    ));
}

#[test]
fn test_list_level_above_limit() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[{"type":"list","content":[{"level":12,"text":"deep"}]}]}"#,
    );

    let err = generator()
        .generate(&config, ws.path("deck.pptx"))
        .unwrap_err();
    assert!(matches!(err.slide_error(), Some(SlideError::Render(_))));
}

#[test]
fn test_empty_presentation_saves_empty_deck() {
    let ws = Workspace::new();
    let config = ws.write("deck.json", r#"{"presentation": []}"#);
    let output = ws.path("deck.pptx");

    let deck = generator().generate(&config, &output).unwrap();
    assert!(deck.is_empty());
    assert!(output.exists());
}

#[test]
fn test_control_character_in_text_stops_run() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[
            {"type":"text","title":"ok","content":"fine"},
            {"type":"title","title":"a\u0001b","content":"C"}
        ]}"#,
    );
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    match err {
        GenerateError::SlideFailed { index, source } => {
            assert_eq!(index, 2);
            assert!(matches!(
                source,
                SlideError::Render(PptxError::InvalidText { character: '\u{1}', .. })
            ));
        }
        other => panic!("Expected SlideFailed, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_control_character_in_list_entry() {
    let ws = Workspace::new();
    let config = ws.write(
        "deck.json",
        r#"{"presentation":[{"type":"list","content":[{"level":0,"text":"x\u001fy"}]}]}"#,
    );
    let output = ws.path("deck.pptx");

    let err = generator().generate(&config, &output).unwrap_err();
    assert!(matches!(err.slide_error(), Some(SlideError::Render(_))));
    assert!(!output.exists());
}

