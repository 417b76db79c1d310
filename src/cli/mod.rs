//! Command-line interface for blogsmith.
//!
//! Provides commands for listing topics, generating one post, generating
//! every post, and generating an ad-hoc custom post.
//!
//! Exit status: non-zero only when initialization fails. Per-topic
//! failures in a batch run are reported in the summary but do not change
//! the exit code.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::{Engine, EngineOptions, PublishOutcome, TopicOutcome};
use crate::domain::PostStatus;

/// blogsmith - Generate blog posts from spreadsheet topics
#[derive(Parser, Debug)]
#[command(name = "blogsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Publish generated posts to WordPress (instead of markdown only)
    #[arg(short = 'w', long, global = true)]
    pub publish: bool,

    /// WordPress post status for published posts
    #[arg(long, value_enum, default_value = "draft", global = true)]
    pub status: StatusArg,

    /// Output directory for markdown files
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// AI model to use
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all available blog topics from the spreadsheet
    List,

    /// Generate a blog post for a specific row number
    Generate {
        /// 1-based row number within the sheet's data range
        row: u32,
    },

    /// Generate blog posts for ALL topics
    GenerateAll,

    /// Generate a blog post for an ad-hoc topic
    Custom {
        /// Free-form topic; doubles as title and primary keywords
        topic: String,
    },
}

/// Post status for CLI (maps to PostStatus)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Draft,
    Publish,
    Private,
}

impl From<StatusArg> for PostStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Draft => PostStatus::Draft,
            StatusArg::Publish => PostStatus::Publish,
            StatusArg::Private => PostStatus::Private,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        // Initialization failures are fatal and propagate to main
        let mut config = Config::load()?;
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }

        let options = EngineOptions {
            output_dir: config.output_dir.clone(),
            status: self.status.into(),
            publish: self.publish,
        };

        let engine = Engine::init(&config, options).await?;
        info!("Blog engine initialized");

        match self.command {
            Commands::List => list_topics(&engine),
            Commands::Generate { row } => generate_one(&engine, row).await,
            Commands::GenerateAll => generate_all(&engine).await,
            Commands::Custom { topic } => generate_custom(&engine, &topic).await,
        }

        Ok(())
    }
}

/// Print every loaded topic with its keywords
fn list_topics(engine: &Engine) {
    let topics = engine.topics();

    if topics.is_empty() {
        warn!("No topics found in the spreadsheet");
        return;
    }

    println!("{:<6} {:<50}", "ROW", "TITLE");
    println!("{}", "-".repeat(80));

    for topic in topics {
        println!("{:<6} {:<50}", topic.row.to_string(), topic.title);
        println!("       primary:   {}", topic.primary_keywords);
        println!("       auxiliary: {}", topic.auxiliary_keywords);
    }

    println!("\nTotal: {} blog topics", topics.len());

    if engine.publishing_enabled() {
        println!("WordPress publishing is ENABLED");
    } else {
        println!("Markdown-only mode (add --publish to push to WordPress)");
    }
}

/// Report the result of one processed topic
fn report_outcome(outcome: &TopicOutcome) {
    println!("Markdown saved: {}", outcome.path.display());

    match &outcome.publish {
        PublishOutcome::Published(id) => {
            println!("Published to WordPress, post ID: {}", id);
        }
        PublishOutcome::Failed(e) => {
            eprintln!("WordPress publishing failed: {}", e);
        }
        PublishOutcome::Skipped => {}
    }
}

/// Generate a post for one spreadsheet row
async fn generate_one(engine: &Engine, row: u32) {
    match engine.generate_one(row).await {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => {
            error!(row, error = %e, "Generation failed");
            eprintln!("{}", e);
        }
    }
}

/// Generate posts for every topic and print the run summary
async fn generate_all(engine: &Engine) {
    let summary = engine.generate_all().await;

    println!(
        "Generated: {}/{} markdown files",
        summary.written, summary.attempted
    );
    if engine.publishing_enabled() {
        println!(
            "Published: {}/{} WordPress posts",
            summary.published, summary.attempted
        );
    }
}

/// Generate a post for an ad-hoc topic
async fn generate_custom(engine: &Engine, topic: &str) {
    info!(topic, "Generating custom blog post");

    match engine.generate_custom(topic).await {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => {
            error!(topic, error = %e, "Generation failed");
            eprintln!("{}", e);
        }
    }
}
