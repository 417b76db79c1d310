//! Pipeline Engine Integration Tests
//!
//! Exercises the engine against mock collaborators: batch failure
//! isolation, probe-gated publishing, and publish failure handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use blogsmith::adapters::{Generator, NewPost, RemotePublisher};
use blogsmith::domain::{PostStatus, RemotePostId, RowId, TopicRecord};
use blogsmith::{Engine, EngineOptions, PublishOutcome, TopicError};

/// Generator returning a well-formed tagged response, except for topics
/// whose title appears in `fail_on`
struct MockGenerator {
    fail_on: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockGenerator {
    fn new() -> Self {
        Self {
            fail_on: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing_on(title: &str) -> Self {
        Self {
            fail_on: Some(title.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(bad) = &self.fail_on {
            if prompt.contains(bad) {
                anyhow::bail!("completion service unavailable");
            }
        }

        Ok("META_DESCRIPTION: A generated description.\n\n# Generated Post\n\nBody paragraph."
            .to_string())
    }
}

/// Publisher with a scripted probe result and create behavior.
///
/// Created posts are captured behind an Arc so tests can inspect them
/// after handing the publisher to the engine.
struct MockPublisher {
    probe_ok: bool,
    fail_create: bool,
    created: Arc<Mutex<Vec<NewPost>>>,
}

impl MockPublisher {
    fn new(probe_ok: bool, fail_create: bool) -> Self {
        Self {
            probe_ok,
            fail_create,
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl RemotePublisher for MockPublisher {
    async fn create_post(&self, post: &NewPost) -> Result<RemotePostId> {
        if self.fail_create {
            anyhow::bail!("remote create failed");
        }
        self.created.lock().unwrap().push(post.clone());
        Ok(RemotePostId(42))
    }

    async fn test_connection(&self) -> bool {
        self.probe_ok
    }
}

fn topic(row: u32, title: &str) -> TopicRecord {
    TopicRecord {
        row: RowId::Row(row),
        primary_keywords: format!("kw{}", row),
        auxiliary_keywords: String::new(),
        title: title.to_string(),
    }
}

fn options(dir: &TempDir, publish: bool) -> EngineOptions {
    EngineOptions {
        output_dir: dir.path().to_path_buf(),
        status: PostStatus::Draft,
        publish,
    }
}

fn markdown_files(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".md"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_batch_continues_past_failed_topic() {
    let dir = TempDir::new().unwrap();
    let topics = vec![
        topic(1, "Topic One"),
        topic(2, "Topic Two"),
        topic(3, "Topic Three"),
    ];

    let generator = MockGenerator::failing_on("Topic Two");
    let calls = generator.calls.clone();
    let engine = Engine::new(topics, Box::new(generator), options(&dir, false));

    let summary = engine.generate_all().await;

    // Every topic got a generation attempt, including the one after the failure
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.published, 0);

    // Topic 3 was still processed after topic 2 failed
    let files = markdown_files(&dir);
    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|f| f.ends_with("_topic-one.md")));
    assert!(files.iter().any(|f| f.ends_with("_topic-three.md")));
}

#[tokio::test]
async fn test_failed_probe_disables_publishing() {
    let dir = TempDir::new().unwrap();
    let mut engine = Engine::new(
        vec![topic(1, "Probe Test")],
        Box::new(MockGenerator::new()),
        options(&dir, true),
    );

    engine
        .attach_remote(Box::new(MockPublisher::new(false, false)))
        .await;
    assert!(!engine.publishing_enabled());

    let outcome = engine.generate_one(1).await.unwrap();

    // Markdown still written, publishing skipped rather than failed
    assert!(outcome.path.exists());
    assert!(matches!(outcome.publish, PublishOutcome::Skipped));
}

#[tokio::test]
async fn test_publish_failure_keeps_markdown() {
    let dir = TempDir::new().unwrap();
    let mut engine = Engine::new(
        vec![topic(1, "Flaky Remote")],
        Box::new(MockGenerator::new()),
        options(&dir, true),
    );

    engine
        .attach_remote(Box::new(MockPublisher::new(true, true)))
        .await;
    assert!(engine.publishing_enabled());

    let outcome = engine.generate_one(1).await.unwrap();

    assert!(outcome.path.exists());
    assert!(matches!(outcome.publish, PublishOutcome::Failed(_)));
}

#[tokio::test]
async fn test_successful_publish_sends_html() {
    let dir = TempDir::new().unwrap();
    let publisher = MockPublisher::new(true, false);
    let created = publisher.created.clone();

    let mut engine = Engine::new(
        vec![topic(1, "Publish Me")],
        Box::new(MockGenerator::new()),
        options(&dir, true),
    );
    engine.attach_remote(Box::new(publisher)).await;

    let outcome = engine.generate_one(1).await.unwrap();
    assert!(matches!(
        outcome.publish,
        PublishOutcome::Published(RemotePostId(42))
    ));

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);

    let post = &created[0];
    assert_eq!(post.title, "Publish Me");
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(
        post.meta_description.as_deref(),
        Some("A generated description.")
    );
    // Body was converted to HTML with no front-matter delimiter leaking in
    assert!(post.content.contains("<h1>Generated Post</h1>"));
    assert!(!post.content.contains("---"));
}

#[tokio::test]
async fn test_missing_row_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(
        vec![topic(1, "Only Topic")],
        Box::new(MockGenerator::new()),
        options(&dir, false),
    );

    let result = engine.generate_one(99).await;
    assert!(matches!(result, Err(TopicError::NotFound(99))));

    // No partial output
    assert!(markdown_files(&dir).is_empty());
}

#[tokio::test]
async fn test_custom_topic_round() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(
        Vec::new(),
        Box::new(MockGenerator::new()),
        options(&dir, false),
    );

    let outcome = engine.generate_custom("Ad Hoc Topic").await.unwrap();
    assert!(outcome.path.exists());

    let content = std::fs::read_to_string(&outcome.path).unwrap();
    assert!(content.contains("row_number: custom"));
    assert!(content.contains("title: \"Ad Hoc Topic\""));
}
