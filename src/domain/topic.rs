//! Topic records sourced from the spreadsheet.
//!
//! A topic is one unit of work: a title plus SEO keyword hints. Topics are
//! loaded once at startup and consumed read-only by every pipeline stage.

use serde::{Deserialize, Serialize};

/// Identifier of a topic row.
///
/// Spreadsheet rows get a 1-based offset within the data range; ad-hoc
/// topics synthesized from the command line carry the `custom` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// 1-based row offset within the sheet's data range (row 2 = offset 1)
    Row(u32),

    /// Ad-hoc topic, not backed by a spreadsheet row
    Custom,
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Row(n) => write!(f, "{}", n),
            RowId::Custom => write!(f, "custom"),
        }
    }
}

/// One blog topic to generate a post for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Where this topic came from
    pub row: RowId,

    /// Primary SEO keywords the post should focus on
    pub primary_keywords: String,

    /// Auxiliary keywords to weave in
    pub auxiliary_keywords: String,

    /// Post title
    pub title: String,
}

impl TopicRecord {
    /// Synthesize an ad-hoc topic from a free-form title.
    ///
    /// The title doubles as the primary keywords; auxiliary keywords are
    /// left empty.
    pub fn custom(topic: impl Into<String>) -> Self {
        let topic = topic.into();
        Self {
            row: RowId::Custom,
            primary_keywords: topic.clone(),
            auxiliary_keywords: String::new(),
            title: topic,
        }
    }
}
