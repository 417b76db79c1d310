//! Post Writer Integration Tests
//!
//! Verifies filename derivation, front-matter layout, and byte-for-byte
//! body round-trips through the filesystem.

use regex::Regex;
use tempfile::TempDir;

use blogsmith::core::{write_post, GENERATOR_TAG};
use blogsmith::domain::{GeneratedContent, RowId, TopicRecord};

fn sample_topic() -> TopicRecord {
    TopicRecord {
        row: RowId::Row(2),
        primary_keywords: "greetings, hello".to_string(),
        auxiliary_keywords: "world".to_string(),
        title: "Hello, World! 2025".to_string(),
    }
}

fn sample_content(body: &str) -> GeneratedContent {
    GeneratedContent {
        meta_description: "A friendly greeting for 2025.".to_string(),
        body: body.to_string(),
    }
}

#[test]
fn test_filename_shape() {
    let dir = TempDir::new().unwrap();
    let path = write_post(
        &sample_topic(),
        &sample_content("# Hi"),
        dir.path(),
        false,
    )
    .unwrap();

    let filename = path.file_name().unwrap().to_string_lossy();
    let pattern = Regex::new(r"^\d{8}_\d{6}_hello-world-2025\.md$").unwrap();
    assert!(
        pattern.is_match(&filename),
        "unexpected filename: {}",
        filename
    );
}

#[test]
fn test_body_round_trip() {
    let dir = TempDir::new().unwrap();
    let body = "# Post Title\n\nFirst paragraph.\n\n- a list\n- of things\n\nThe end.";

    let path = write_post(&sample_topic(), &sample_content(body), dir.path(), false).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    // Everything after the front-matter block and its blank line is the
    // body, byte for byte
    let after_header = written
        .splitn(3, "---")
        .nth(2)
        .expect("front-matter block missing");
    assert_eq!(after_header.strip_prefix("\n\n").unwrap(), body);
}

#[test]
fn test_front_matter_schema() {
    let dir = TempDir::new().unwrap();
    let path = write_post(&sample_topic(), &sample_content("body"), dir.path(), true).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    assert!(written.starts_with("---\n"));
    assert!(written.contains("title: \"Hello, World! 2025\"\n"));
    assert!(written.contains("meta_description: \"A friendly greeting for 2025.\"\n"));
    assert!(written.contains("primary_keywords: \"greetings, hello\"\n"));
    assert!(written.contains("auxiliary_keywords: \"world\"\n"));
    assert!(written.contains("row_number: 2\n"));
    assert!(written.contains(&format!("generated_by: \"{}\"\n", GENERATOR_TAG)));
    assert!(written.contains("publishing_enabled: true\n"));

    let date_line = Regex::new(r"(?m)^date: \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
    assert!(date_line.is_match(&written));
}

#[test]
fn test_creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("posts");

    let path = write_post(&sample_topic(), &sample_content("x"), &nested, false).unwrap();
    assert!(path.exists());
    assert!(nested.is_dir());

    // A second write into the now-existing directory also succeeds
    let again = write_post(&sample_topic(), &sample_content("y"), &nested, false);
    assert!(again.is_ok());
}
