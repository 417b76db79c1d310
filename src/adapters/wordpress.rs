//! WordPress XML-RPC client.
//!
//! Builds `wp.newPost` / `wp.getPosts` envelopes by hand and posts them
//! with reqwest; the XML-RPC surface used here is small enough that a
//! dedicated protocol crate would be overkill. Credentials are the fixed
//! endpoint/username/password triple supplied via environment.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::RemotePostId;

use super::{NewPost, RemotePublisher};

/// SEO plugin custom-field keys that all carry the meta description:
/// Yoast, All in One SEO, and a generic fallback key.
const SEO_META_KEYS: [&str; 3] = [
    "_yoast_wpseo_metadesc",
    "_aioseop_description",
    "meta_description",
];

/// WordPress client for publishing blog posts
pub struct WordPressClient {
    endpoint: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl WordPressClient {
    /// Create a new client from the credential triple
    pub fn new(
        endpoint: String,
        username: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self> {
        if endpoint.is_empty() || username.is_empty() || password.is_empty() {
            anyhow::bail!("Missing WordPress credentials");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build WordPress HTTP client")?;

        Ok(Self {
            endpoint,
            username,
            password,
            client,
        })
    }

    /// Issue one XML-RPC method call and return the raw response body
    async fn call(&self, method: &str, extra_params: &str) -> Result<String> {
        let body = format!(
            "<?xml version=\"1.0\"?>\n\
             <methodCall>\n\
             <methodName>{method}</methodName>\n\
             <params>\n\
             <param><value><int>0</int></value></param>\n\
             <param><value><string>{user}</string></value></param>\n\
             <param><value><string>{pass}</string></value></param>\n\
             {extra}\
             </params>\n\
             </methodCall>",
            method = method,
            user = xml_escape(&self.username),
            pass = xml_escape(&self.password),
            extra = extra_params,
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach WordPress for {}", method))?;

        if !response.status().is_success() {
            anyhow::bail!("WordPress returned HTTP {} for {}", response.status(), method);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read WordPress response for {}", method))
    }

    /// Fetch recent posts; only used as the connectivity probe
    pub async fn fetch_posts(&self, count: u32) -> Result<()> {
        let filter = format!(
            "<param><value><struct>\
             <member><name>number</name><value><int>{}</int></value></member>\
             </struct></value></param>\n",
            count
        );

        let response = self.call("wp.getPosts", &filter).await?;
        check_fault(&response)?;

        Ok(())
    }
}

#[async_trait]
impl RemotePublisher for WordPressClient {
    async fn create_post(&self, post: &NewPost) -> Result<RemotePostId> {
        // Excerpt: meta description, else a content prefix
        let excerpt = match &post.meta_description {
            Some(meta) => meta.clone(),
            None => truncate_excerpt(&post.content),
        };

        let mut custom_fields = String::new();
        if let Some(meta) = &post.meta_description {
            for key in SEO_META_KEYS {
                custom_fields.push_str(&format!(
                    "<value><struct>\
                     <member><name>key</name><value><string>{}</string></value></member>\
                     <member><name>value</name><value><string>{}</string></value></member>\
                     </struct></value>",
                    key,
                    xml_escape(meta)
                ));
            }
        }

        let content_struct = format!(
            "<param><value><struct>\
             <member><name>post_title</name><value><string>{title}</string></value></member>\
             <member><name>post_content</name><value><string>{content}</string></value></member>\
             <member><name>post_status</name><value><string>{status}</string></value></member>\
             <member><name>post_excerpt</name><value><string>{excerpt}</string></value></member>\
             <member><name>custom_fields</name><value><array><data>{fields}</data></array></value></member>\
             </struct></value></param>\n",
            title = xml_escape(&post.title),
            content = xml_escape(&post.content),
            status = post.status,
            excerpt = xml_escape(&excerpt),
            fields = custom_fields,
        );

        let response = self.call("wp.newPost", &content_struct).await?;
        let value = parse_scalar_response(&response)?;

        let id: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("WordPress returned a non-numeric post id: {}", value))?;

        debug!(post_id = id, "Created WordPress post");

        Ok(RemotePostId(id))
    }

    async fn test_connection(&self) -> bool {
        match self.fetch_posts(1).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "WordPress connection test failed");
                false
            }
        }
    }
}

/// Escape text for inclusion in an XML text node
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Bail with the fault string if the response carries an XML-RPC fault
fn check_fault(response: &str) -> Result<()> {
    if !response.contains("<fault>") {
        return Ok(());
    }

    let fault_re = Regex::new(
        r"<name>faultString</name>\s*<value>(?:<string>)?([^<]*)(?:</string>)?</value>",
    )
    .expect("fault regex is valid");

    let message = fault_re
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "unknown fault".to_string());

    anyhow::bail!("WordPress XML-RPC fault: {}", message)
}

/// Extract the single scalar value from a non-fault method response
fn parse_scalar_response(response: &str) -> Result<String> {
    check_fault(response)?;

    let value_re = Regex::new(r"<(?:string|int|i4)>([^<]*)</(?:string|int|i4)>")
        .expect("value regex is valid");

    value_re
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .context("WordPress response contained no scalar value")
}

/// First 200 chars of content, with an ellipsis when truncated
fn truncate_excerpt(content: &str) -> String {
    if content.chars().count() > 200 {
        let prefix: String = content.chars().take(200).collect();
        format!("{}...", prefix)
    } else {
        content.to_string()
    }
}
