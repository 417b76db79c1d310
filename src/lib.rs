//! blogsmith - Spreadsheet-driven blog post generator
//!
//! Reads topic rows from a Google Sheet, drafts one blog post plus meta
//! description per topic via a completion API, writes each result as a
//! front-matter-tagged markdown file, and optionally publishes it to
//! WordPress over XML-RPC.
//!
//! # Architecture
//!
//! The pipeline is a strictly sequential data transformation:
//! topic -> prompt -> raw completion -> (meta description, body)
//! -> markdown file -> optional remote post. No retries, no concurrency,
//! no resumption; per-topic failures are caught at the batch boundary.
//!
//! # Modules
//!
//! - `adapters`: External collaborators (Sheets, OpenRouter, WordPress)
//! - `core`: Pipeline stages (parse, write, html, engine)
//! - `domain`: Data structures (TopicRecord, GeneratedContent, RunSummary)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List topics
//! blogsmith list
//!
//! # Generate one post as markdown
//! blogsmith generate 1
//!
//! # Generate everything and publish
//! blogsmith generate-all --publish --status draft
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{Engine, EngineOptions, PublishOutcome, TopicError, TopicOutcome};
pub use crate::domain::{
    GeneratedContent, PostStatus, RemotePostId, RowId, RunSummary, TopicRecord,
};
