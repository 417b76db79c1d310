//! Core pipeline logic.
//!
//! This module contains:
//! - parse: Splitting generator output into description and body
//! - write: Markdown persistence with front matter
//! - html: Markdown-to-HTML conversion strategies
//! - engine: The pipeline engine tying the stages together

pub mod engine;
pub mod html;
pub mod parse;
pub mod write;

// Re-export commonly used types
pub use engine::{Engine, EngineOptions, PublishOutcome, TopicError, TopicOutcome};
pub use html::{render_html, strip_front_matter, CmarkConverter, HtmlConvert, RegexConverter};
pub use parse::parse_response;
pub use write::{slugify, write_post, GENERATOR_TAG};
