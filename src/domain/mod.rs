//! Domain types for the blogsmith pipeline.
//!
//! This module contains the core data structures:
//! - TopicRecord: One unit of work from the spreadsheet (or ad-hoc)
//! - GeneratedContent: Parsed completion output
//! - RunSummary: Batch run counters

pub mod post;
pub mod topic;

// Re-export commonly used types
pub use post::{GeneratedContent, PostStatus, RemotePostId, RunSummary};
pub use topic::{RowId, TopicRecord};
