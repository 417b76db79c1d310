//! Response parsing for generated content.
//!
//! The prompt asks the model to lead with a `META_DESCRIPTION:` line, a
//! blank line, then the markdown post. Models don't always comply, so a
//! fallback derives a description from the first paragraph instead.

use crate::domain::GeneratedContent;

const META_TAG: &str = "META_DESCRIPTION:";

/// Maximum fallback description length before the ellipsis kicks in
const META_MAX_LEN: usize = 157;

/// Split raw generator output into a meta description and a markdown body.
///
/// Never fails: untagged input (including empty input) takes the fallback
/// path, where the body is the raw text unchanged. A tagged response with
/// no newline after the tag also falls through to the fallback.
pub fn parse_response(raw: &str) -> GeneratedContent {
    if raw.starts_with(META_TAG) {
        let mut parts = raw.splitn(3, '\n');
        let first = parts.next().unwrap_or_default();

        if let Some(rest_head) = parts.next() {
            let meta_description = first
                .strip_prefix(META_TAG)
                .unwrap_or_default()
                .trim()
                .to_string();

            let body = match parts.next() {
                Some(rest_tail) => format!("{}\n{}", rest_head, rest_tail),
                None => rest_head.to_string(),
            };

            return GeneratedContent {
                meta_description,
                body: body.trim().to_string(),
            };
        }
        // Tagged but single-line: fall through to the fallback path
    }

    GeneratedContent {
        meta_description: fallback_description(raw),
        body: raw.to_string(),
    }
}

/// Derive a meta description from the first non-blank, non-heading line
fn fallback_description(raw: &str) -> String {
    let first_paragraph = raw
        .lines()
        .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(str::trim)
        .unwrap_or_default();

    if first_paragraph.chars().count() > META_MAX_LEN {
        let prefix: String = first_paragraph.chars().take(META_MAX_LEN).collect();
        format!("{}...", prefix)
    } else {
        first_paragraph.to_string()
    }
}
