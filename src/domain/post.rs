//! Generated content and publishing value types.

use serde::{Deserialize, Serialize};

/// Parsed output of one completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Short SEO meta description (target 150-160 chars, not enforced)
    pub meta_description: String,

    /// Markdown post body
    pub body: String,
}

/// WordPress post status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Publish,
    Private,
}

impl Default for PostStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Publish => write!(f, "publish"),
            PostStatus::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "publish" | "published" => Ok(PostStatus::Publish),
            "private" => Ok(PostStatus::Private),
            _ => anyhow::bail!("Unknown post status: {}", s),
        }
    }
}

/// Handle the CMS returns for a newly created post.
///
/// Not persisted locally: once the process exits there is no linkage
/// between a markdown file and its remote post, so re-running a topic
/// creates a duplicate remote post. Known gap, intentionally left as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePostId(pub i64);

impl std::fmt::Display for RemotePostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counters accumulated over a batch run, printed at the end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Topics the run attempted
    pub attempted: usize,

    /// Markdown files successfully written
    pub written: usize,

    /// Remote posts successfully created
    pub published: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_status_round_trip() {
        for status in [PostStatus::Draft, PostStatus::Publish, PostStatus::Private] {
            let parsed: PostStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("pending".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_summary_default() {
        let summary = RunSummary::default();
        assert_eq!(summary.attempted, 0);
        assert_eq!(summary.written, 0);
        assert_eq!(summary.published, 0);
    }
}
