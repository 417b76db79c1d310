//! Markdown persistence for generated posts.
//!
//! Each post becomes one file named `YYYYMMDD_HHMMSS_<slug>.md` in the
//! output directory, holding a fixed-key front-matter block followed by
//! the untouched body. Two posts generated within the same second with
//! the same truncated title will collide; that limitation is accepted
//! rather than papered over with a uniqueness suffix.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use regex::Regex;
use tracing::debug;

use crate::domain::{GeneratedContent, TopicRecord};

/// Identity string recorded in every front-matter block
pub const GENERATOR_TAG: &str = "blogsmith v0.1";

/// Maximum slug length before the timestamp prefix
const SLUG_MAX_LEN: usize = 50;

/// Turn a post title into a filename-safe slug.
///
/// Strips everything but alphanumerics, whitespace, and hyphens, then
/// collapses whitespace runs into single hyphens, lowercases, and
/// truncates to 50 characters.
pub fn slugify(title: &str) -> String {
    let strip = Regex::new(r"[^a-zA-Z0-9\s-]").expect("strip regex is valid");
    let spaces = Regex::new(r"\s+").expect("whitespace regex is valid");

    let cleaned = strip.replace_all(title, "");
    let hyphenated = spaces.replace_all(cleaned.trim(), "-");
    let lowered = hyphenated.to_lowercase();

    lowered.chars().take(SLUG_MAX_LEN).collect()
}

/// Serialize the front-matter block for a post.
///
/// String fields are double-quoted with no escaping, matching the file
/// format this tool has always produced: a title containing a double
/// quote will corrupt its own header.
fn front_matter(
    topic: &TopicRecord,
    content: &GeneratedContent,
    publishing_enabled: bool,
) -> String {
    let now = Local::now();

    format!(
        "---\n\
         title: \"{title}\"\n\
         meta_description: \"{meta}\"\n\
         date: {date}\n\
         primary_keywords: \"{primary}\"\n\
         auxiliary_keywords: \"{auxiliary}\"\n\
         row_number: {row}\n\
         generated_by: \"{generator}\"\n\
         publishing_enabled: {publishing}\n\
         ---\n\n",
        title = topic.title,
        meta = content.meta_description,
        date = now.format("%Y-%m-%d %H:%M:%S"),
        primary = topic.primary_keywords,
        auxiliary = topic.auxiliary_keywords,
        row = topic.row,
        generator = GENERATOR_TAG,
        publishing = publishing_enabled,
    )
}

/// Write one post to the output directory and return its path.
///
/// The full file content is assembled in memory before a single write
/// call, so a failed write leaves no partial file behind. The output
/// directory is created if absent.
pub fn write_post(
    topic: &TopicRecord,
    content: &GeneratedContent,
    output_dir: &Path,
    publishing_enabled: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{}.md", timestamp, slugify(&topic.title));
    let path = output_dir.join(filename);

    let full_content = format!(
        "{}{}",
        front_matter(topic, content, publishing_enabled),
        content.body
    );

    std::fs::write(&path, full_content)
        .with_context(|| format!("Failed to save markdown file: {}", path.display()))?;

    debug!(path = %path.display(), "Markdown file written");

    Ok(path)
}
