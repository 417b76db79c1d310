//! Markdown to HTML conversion for remote publishing.
//!
//! Two strategies sit behind the same interface: a full CommonMark
//! renderer (pulldown-cmark) as the primary path, and a reduced
//! regex-based converter as the fallback. The fallback never fails; at
//! worst it returns the input wrapped in paragraph tags. The strategies
//! are selected on primary failure, never mixed.

use anyhow::Result;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use tracing::{debug, warn};

/// A markdown-to-HTML conversion strategy
pub trait HtmlConvert {
    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Convert markdown to HTML
    fn convert(&self, markdown: &str) -> Result<String>;
}

/// Primary converter: full CommonMark with tables and strikethrough
pub struct CmarkConverter;

impl HtmlConvert for CmarkConverter {
    fn name(&self) -> &str {
        "cmark"
    }

    fn convert(&self, markdown: &str) -> Result<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);

        Ok(out.trim().to_string())
    }
}

/// Fallback converter: headers, bold, italic, and paragraph wrapping.
///
/// Good enough for plain prose when the primary path fails. Infallible.
pub struct RegexConverter;

impl HtmlConvert for RegexConverter {
    fn name(&self) -> &str {
        "regex"
    }

    fn convert(&self, markdown: &str) -> Result<String> {
        let h3 = Regex::new(r"(?m)^### (.+)$").expect("h3 regex is valid");
        let h2 = Regex::new(r"(?m)^## (.+)$").expect("h2 regex is valid");
        let h1 = Regex::new(r"(?m)^# (.+)$").expect("h1 regex is valid");
        let bold = Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid");
        let italic = Regex::new(r"\*(.+?)\*").expect("italic regex is valid");

        let mut text = markdown.to_string();
        text = h3.replace_all(&text, "<h3>$1</h3>").into_owned();
        text = h2.replace_all(&text, "<h2>$1</h2>").into_owned();
        text = h1.replace_all(&text, "<h1>$1</h1>").into_owned();
        text = bold.replace_all(&text, "<strong>$1</strong>").into_owned();
        text = italic.replace_all(&text, "<em>$1</em>").into_owned();

        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                if p.starts_with('<') {
                    p.to_string()
                } else {
                    format!("<p>{}</p>", p)
                }
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

/// Strip a leading YAML front-matter block if present.
///
/// Only the first two `---` delimiters are treated as the boundary; the
/// content after the second one, trimmed, is returned. Input without a
/// leading delimiter passes through unchanged.
pub fn strip_front_matter(markdown: &str) -> &str {
    if !markdown.starts_with("---") {
        return markdown;
    }

    let mut parts = markdown.splitn(3, "---");
    let _ = parts.next();
    let _ = parts.next();
    match parts.next() {
        Some(rest) => rest.trim(),
        None => markdown,
    }
}

/// Render markdown to HTML, stripping front matter first.
///
/// Tries the primary strategy; on failure logs a warning and uses the
/// fallback instead.
pub fn render_html(primary: &dyn HtmlConvert, fallback: &dyn HtmlConvert, markdown: &str) -> String {
    let body = strip_front_matter(markdown);

    match primary.convert(body) {
        Ok(out) => {
            debug!(
                strategy = primary.name(),
                markdown_len = body.len(),
                html_len = out.len(),
                "Converted markdown to HTML"
            );
            out
        }
        Err(e) => {
            warn!(
                strategy = primary.name(),
                error = %e,
                "Primary HTML conversion failed, using fallback"
            );
            fallback
                .convert(body)
                .unwrap_or_else(|_| format!("<p>{}</p>", body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmark_basic_conversion() {
        let html = CmarkConverter.convert("# Title\n\nSome **bold** text.").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_cmark_lists_and_code() {
        let html = CmarkConverter
            .convert("- one\n- two\n\n```\ncode here\n```")
            .unwrap();
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<code>"));
    }

    #[test]
    fn test_regex_headers_and_emphasis() {
        let html = RegexConverter
            .convert("# Big\n\n## Medium\n\n**bold** and *slanted*")
            .unwrap();
        assert!(html.contains("<h1>Big</h1>"));
        assert!(html.contains("<h2>Medium</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>slanted</em>"));
    }

    #[test]
    fn test_regex_paragraph_wrapping() {
        let html = RegexConverter
            .convert("First paragraph.\n\nSecond paragraph.")
            .unwrap();
        assert_eq!(html, "<p>First paragraph.</p>\n<p>Second paragraph.</p>");
    }

    #[test]
    fn test_regex_plain_text_never_empty() {
        let html = RegexConverter.convert("just plain text").unwrap();
        assert!(!html.is_empty());
        assert_eq!(html, "<p>just plain text</p>");
    }

    #[test]
    fn test_strip_front_matter() {
        let markdown = "---\ntitle: \"T\"\ndate: 2025-01-01\n---\n\n# Body\n\nText";
        assert_eq!(strip_front_matter(markdown), "# Body\n\nText");
    }

    #[test]
    fn test_strip_front_matter_absent() {
        let markdown = "# Body\n\nText with --- inline";
        assert_eq!(strip_front_matter(markdown), markdown);
    }

    #[test]
    fn test_strip_front_matter_unclosed() {
        // A lone delimiter with no closing pair passes through unchanged
        let markdown = "---\ntitle: broken";
        assert_eq!(strip_front_matter(markdown), markdown);
    }

    struct FailingConverter;

    impl HtmlConvert for FailingConverter {
        fn name(&self) -> &str {
            "failing"
        }

        fn convert(&self, _markdown: &str) -> Result<String> {
            anyhow::bail!("conversion exploded")
        }
    }

    #[test]
    fn test_fallback_engaged_on_primary_failure() {
        let html = render_html(&FailingConverter, &RegexConverter, "plain prose");
        assert_eq!(html, "<p>plain prose</p>");
    }

    #[test]
    fn test_render_strips_front_matter_before_conversion() {
        let markdown = "---\ntitle: \"T\"\n---\n\n# Heading\n\nBody.";
        let html = render_html(&CmarkConverter, &RegexConverter, markdown);
        assert!(!html.contains("---"));
        assert!(html.contains("<h1>Heading</h1>"));
    }
}
