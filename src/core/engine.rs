//! Pipeline engine: composes topic selection, generation, parsing,
//! persistence, and publishing for one topic at a time.
//!
//! The engine owns its collaborators behind trait objects so runs can be
//! exercised without network access. Everything is strictly sequential:
//! a topic's publish attempt completes before the next topic starts.
//!
//! Failure policy (no retries anywhere):
//! - Initialization failures propagate as `anyhow::Error` and abort the
//!   process before any topic is touched.
//! - Per-topic failures are `TopicError`s; batch mode catches them at the
//!   loop boundary, logs, and moves on.
//! - Publish failures never fail a topic: the markdown file already
//!   exists and is counted as written.

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::{
    openrouter::build_prompt, Generator, NewPost, OpenRouterClient, RemotePublisher, SheetsClient,
    TopicSource, WordPressClient,
};
use crate::config::Config;
use crate::domain::{GeneratedContent, PostStatus, RemotePostId, RowId, RunSummary, TopicRecord};

use super::html::{render_html, CmarkConverter, RegexConverter};
use super::parse::parse_response;
use super::write::write_post;

/// Per-topic failure, caught at the batch loop boundary
#[derive(Debug, Error)]
pub enum TopicError {
    /// Requested row does not exist (single-topic mode only)
    #[error("Row {0} not found")]
    NotFound(u32),

    /// The completion call failed
    #[error("AI generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    /// The markdown file could not be written
    #[error("Markdown write failed: {0}")]
    Write(#[source] anyhow::Error),
}

/// What happened to a topic's remote publish step
#[derive(Debug)]
pub enum PublishOutcome {
    /// Publishing was not enabled for this run (or was disabled by a
    /// failed connectivity probe)
    Skipped,

    /// Remote post created
    Published(RemotePostId),

    /// Remote call failed; the local markdown file still exists
    Failed(String),
}

/// Result of one fully processed topic
#[derive(Debug)]
pub struct TopicOutcome {
    /// Path of the written markdown file
    pub path: PathBuf,

    /// Remote publish result
    pub publish: PublishOutcome,
}

/// Run options resolved from CLI flags and config
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory receiving markdown files
    pub output_dir: PathBuf,

    /// WordPress post status for published posts
    pub status: PostStatus,

    /// Whether remote publishing was requested
    pub publish: bool,
}

/// The pipeline engine
pub struct Engine {
    topics: Vec<TopicRecord>,
    generator: Box<dyn Generator>,
    remote: Option<Box<dyn RemotePublisher>>,
    publishing_enabled: bool,
    status: PostStatus,
    output_dir: PathBuf,
}

impl Engine {
    /// Assemble an engine from already-constructed collaborators
    pub fn new(
        topics: Vec<TopicRecord>,
        generator: Box<dyn Generator>,
        options: EngineOptions,
    ) -> Self {
        Self {
            topics,
            generator,
            remote: None,
            publishing_enabled: false,
            status: options.status,
            output_dir: options.output_dir,
        }
    }

    /// Build the engine with its real collaborators.
    ///
    /// Fatal on any collaborator construction or topic-load failure. A
    /// failed WordPress connectivity probe is NOT fatal: the run degrades
    /// to markdown-only mode.
    pub async fn init(config: &Config, options: EngineOptions) -> Result<Self> {
        let sheets = SheetsClient::new(
            config.spreadsheet_id.clone(),
            config.sheets_api_key.clone(),
            config.request_timeout,
        )?;
        let topics = sheets.list_topics().await?;

        let generator = OpenRouterClient::new(
            config.openrouter_api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        )?;
        info!(model = generator.model(), "AI client initialized");

        let publish = options.publish;
        let mut engine = Engine::new(topics, Box::new(generator), options);

        if publish {
            let wordpress = WordPressClient::new(
                config.wordpress_url.clone(),
                config.wordpress_username.clone(),
                config.wordpress_password.clone(),
                config.request_timeout,
            )?;
            engine.attach_remote(Box::new(wordpress)).await;
        }

        Ok(engine)
    }

    /// Attach a remote publisher, gated on its connectivity probe.
    ///
    /// If the probe fails, publishing stays disabled for the whole run
    /// and posts are saved as markdown only.
    pub async fn attach_remote(&mut self, remote: Box<dyn RemotePublisher>) {
        if remote.test_connection().await {
            info!("WordPress client connected, publishing enabled");
            self.publishing_enabled = true;
        } else {
            warn!("WordPress connection failed, falling back to markdown-only mode");
            self.publishing_enabled = false;
        }
        self.remote = Some(remote);
    }

    /// Whether posts will be pushed to the CMS this run
    pub fn publishing_enabled(&self) -> bool {
        self.publishing_enabled
    }

    /// Loaded topics, in sheet order
    pub fn topics(&self) -> &[TopicRecord] {
        &self.topics
    }

    /// Generate a post for one spreadsheet row
    pub async fn generate_one(&self, row: u32) -> Result<TopicOutcome, TopicError> {
        let topic = self
            .topics
            .iter()
            .find(|t| t.row == RowId::Row(row))
            .cloned()
            .ok_or(TopicError::NotFound(row))?;

        self.process_topic(&topic).await
    }

    /// Generate posts for every loaded topic.
    ///
    /// Each topic runs inside its own failure boundary; a failed topic is
    /// logged and skipped, never aborting the batch. The summary counts
    /// completions, not attempts.
    pub async fn generate_all(&self) -> RunSummary {
        info!(count = self.topics.len(), "Generating all blog posts");

        let mut summary = RunSummary {
            attempted: self.topics.len(),
            ..Default::default()
        };

        for topic in &self.topics {
            info!(row = %topic.row, title = %topic.title, "Generating");

            match self.process_topic(topic).await {
                Ok(outcome) => {
                    summary.written += 1;
                    info!(path = %outcome.path.display(), "Markdown saved");
                    match outcome.publish {
                        PublishOutcome::Published(id) => {
                            summary.published += 1;
                            info!(post_id = %id, "Published to WordPress");
                        }
                        PublishOutcome::Failed(e) => {
                            error!(row = %topic.row, error = %e, "WordPress publishing failed");
                        }
                        PublishOutcome::Skipped => {}
                    }
                }
                Err(e) => {
                    error!(row = %topic.row, title = %topic.title, error = %e, "Topic failed");
                }
            }
        }

        summary
    }

    /// Generate a post for an ad-hoc topic not backed by the sheet
    pub async fn generate_custom(&self, topic: &str) -> Result<TopicOutcome, TopicError> {
        let record = TopicRecord::custom(topic);
        self.process_topic(&record).await
    }

    /// Run the four pipeline stages for one topic:
    /// generate -> parse -> write -> publish (if enabled)
    async fn process_topic(&self, topic: &TopicRecord) -> Result<TopicOutcome, TopicError> {
        let prompt = build_prompt(topic);
        let raw = self
            .generator
            .complete(&prompt)
            .await
            .map_err(TopicError::Generation)?;

        let content = parse_response(&raw);
        info!(meta = %content.meta_description, "Meta description extracted");

        let path = write_post(topic, &content, &self.output_dir, self.publishing_enabled)
            .map_err(TopicError::Write)?;

        let publish = if self.publishing_enabled {
            match &self.remote {
                Some(remote) => self.publish_topic(remote.as_ref(), topic, &content).await,
                None => PublishOutcome::Skipped,
            }
        } else {
            PublishOutcome::Skipped
        };

        Ok(TopicOutcome { path, publish })
    }

    /// Convert the body to HTML and issue the single remote create call.
    /// Errors are reported, never propagated past this boundary.
    async fn publish_topic(
        &self,
        remote: &dyn RemotePublisher,
        topic: &TopicRecord,
        content: &GeneratedContent,
    ) -> PublishOutcome {
        let html = render_html(&CmarkConverter, &RegexConverter, &content.body);

        let post = NewPost {
            title: topic.title.clone(),
            content: html,
            status: self.status,
            meta_description: if content.meta_description.is_empty() {
                None
            } else {
                Some(content.meta_description.clone())
            },
        };

        match remote.create_post(&post).await {
            Ok(id) => PublishOutcome::Published(id),
            Err(e) => PublishOutcome::Failed(e.to_string()),
        }
    }
}
