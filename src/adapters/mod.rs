//! Adapter interfaces for external collaborators.
//!
//! The pipeline talks to three external systems: the spreadsheet holding
//! topics, the completion API drafting posts, and the CMS receiving
//! published posts. Each sits behind a trait so the engine can be
//! exercised without network access.

pub mod openrouter;
pub mod sheets;
pub mod wordpress;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{PostStatus, RemotePostId, TopicRecord};

// Re-export the concrete clients
pub use openrouter::OpenRouterClient;
pub use sheets::SheetsClient;
pub use wordpress::WordPressClient;

/// Ordered source of topic records
#[async_trait]
pub trait TopicSource: Send + Sync {
    /// Load every topic row, in sheet order
    async fn list_topics(&self) -> Result<Vec<TopicRecord>>;
}

/// Text completion service drafting one post per topic
#[async_trait]
pub trait Generator: Send + Sync {
    /// Run one completion request and return the raw generated text
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Post to be created on the CMS
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,

    /// HTML post body
    pub content: String,

    pub status: PostStatus,

    /// Meta description; when absent the CMS excerpt falls back to a
    /// content prefix
    pub meta_description: Option<String>,
}

/// Remote content-management system
#[async_trait]
pub trait RemotePublisher: Send + Sync {
    /// Create one post, returning its remote identifier
    async fn create_post(&self, post: &NewPost) -> Result<RemotePostId>;

    /// Cheap read-only probe used once at startup to decide whether
    /// publishing stays enabled for the run
    async fn test_connection(&self) -> bool;
}
