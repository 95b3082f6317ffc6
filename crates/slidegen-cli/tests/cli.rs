//! Integration tests for the slidegen binary

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::ZipArchive;

fn slidegen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidegen"))
        .args(args)
        .current_dir(dir)
        .env_remove("SLIDEGEN_LOG")
        .output()
        .unwrap()
}

fn read_part(pptx: &Path, name: &str) -> String {
    let bytes = fs::read(pptx).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

const DECK: &str = r#"{"presentation": [
    {"type": "title", "title": "Quarterly report", "content": "Operations"},
    {"type": "text", "title": "Summary", "content": "All targets met"},
    {"type": "list", "title": "Agenda", "content": [
        {"level": 0, "text": "Results"},
        {"level": 1, "text": "Revenue"}
    ]}
]}"#;

#[test]
fn test_no_arguments_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = slidegen(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.trim().is_empty());
    assert!(stdout.contains("generate"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let output = slidegen(dir.path(), &["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_without_config() {
    let dir = TempDir::new().unwrap();
    let output = slidegen(dir.path(), &["generate", "--output", "deck.pptx"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--config"));
    assert!(!dir.path().join("deck.pptx").exists());
}

#[test]
fn test_unknown_command() {
    let dir = TempDir::new().unwrap();
    let output = slidegen(dir.path(), &["publish"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_generate_deck() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("deck.json"), DECK).unwrap();

    let output = slidegen(
        dir.path(),
        &["generate", "--config", "deck.json", "--output", "deck.pptx"],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pptx = dir.path().join("deck.pptx");
    let presentation = read_part(&pptx, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 3);
    assert!(read_part(&pptx, "ppt/slides/slide1.xml").contains("Quarterly report"));

    let log = fs::read_to_string(dir.path().join("slidegen.log")).unwrap();
    assert!(log.contains(" - INFO - Configuration file loaded: \"deck.json\""));
    assert!(log.contains(" - INFO - Slide number 3 generated"));
    assert!(log.contains(" - INFO - Presentation saved: \"deck.pptx\""));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Slide number 1 generated"));
}

#[test]
fn test_log_file_is_appended() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("deck.json"), DECK).unwrap();

    for _ in 0..2 {
        let output = slidegen(
            dir.path(),
            &["generate", "--config", "deck.json", "--output", "deck.pptx"],
        );
        assert_eq!(output.status.code(), Some(0));
    }

    let log = fs::read_to_string(dir.path().join("slidegen.log")).unwrap();
    assert_eq!(log.matches("Presentation saved").count(), 2);
}

#[test]
fn test_failing_slide_exits_with_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("deck.json"),
        r#"{"presentation": [{"type": "title"}, {"type": "video"}]}"#,
    )
    .unwrap();

    let output = slidegen(
        dir.path(),
        &["generate", "--config", "deck.json", "--output", "deck.pptx"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("deck.pptx").exists());

    let log = fs::read_to_string(dir.path().join("slidegen.log")).unwrap();
    assert!(log.contains(" - ERROR - "));
    assert!(log.contains("Slide number 2 is not in a valid format"));
    assert!(log.contains("video"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let output = slidegen(
        dir.path(),
        &["generate", "--config", "absent.json", "--output", "deck.pptx"],
    );

    assert_eq!(output.status.code(), Some(1));
    let log = fs::read_to_string(dir.path().join("slidegen.log")).unwrap();
    assert!(log.contains("absent.json"));
}

#[test]
fn test_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("deck.json"), DECK).unwrap();
    fs::write(
        dir.path().join("team.toml"),
        "[meta]\ntitle = \"Ops review\"\nauthor = \"Operations\"\n",
    )
    .unwrap();

    let output = slidegen(
        dir.path(),
        &[
            "generate",
            "--config",
            "deck.json",
            "--output",
            "deck.pptx",
            "--settings",
            "team.toml",
        ],
    );
    assert_eq!(output.status.code(), Some(0));

    let core = read_part(&dir.path().join("deck.pptx"), "docProps/core.xml");
    assert!(core.contains("<dc:title>Ops review</dc:title>"));
    assert!(core.contains("<dc:creator>Operations</dc:creator>"));
}

#[test]
fn test_missing_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("deck.json"), DECK).unwrap();

    let output = slidegen(
        dir.path(),
        &[
            "generate",
            "--config",
            "deck.json",
            "--output",
            "deck.pptx",
            "--settings",
            "absent.toml",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("deck.pptx").exists());
}
