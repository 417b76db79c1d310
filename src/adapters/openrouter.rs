//! OpenRouter completion client.
//!
//! Sends one chat-completion request per topic and returns the raw
//! generated text. The prompt asks the model to lead with a
//! `META_DESCRIPTION:` line so the response parser can split description
//! from body.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::TopicRecord;

use super::Generator;

const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// OpenRouter chat-completions client
pub struct OpenRouterClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenRouterClient {
    /// Create a new client for a given model
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build OpenRouter HTTP client")?;

        Ok(Self {
            api_key,
            model,
            client,
        })
    }

    /// Model identifier in use
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach OpenRouter")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouter returned {}: {}", status, body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("OpenRouter response contained no choices")?;

        Ok(content.trim().to_string())
    }
}

/// Build the generation prompt for one topic.
///
/// Requests a leading `META_DESCRIPTION:` line, a blank line, then a
/// markdown post with a `#` title, 3-5 `##` sections, lists, and a target
/// length of 800-1200 words.
pub fn build_prompt(topic: &TopicRecord) -> String {
    format!(
        r#"Write an engaging, comprehensive blog post about "{title}".

Primary keywords to focus on: {primary}
Auxiliary keywords to include: {auxiliary}

Requirements:
- FIRST: Write a compelling meta description (150-160 characters) that includes primary keywords
- Format the meta description as: META_DESCRIPTION: [your description here]
- Then write the blog post in markdown format
- Include a compelling title with # header
- Add an engaging introduction
- Create 3-5 main sections with ## headers
- Include practical tips, examples, or insights
- Add a strong conclusion
- Use bullet points and numbered lists where appropriate
- Make it SEO-friendly but natural and engaging
- Aim for 800-1200 words

IMPORTANT: Start your response with the meta description line, then add a blank line, then write the blog post.

Example format:
META_DESCRIPTION: Learn how digital marketing transforms businesses with proven strategies that boost sales, increase brand awareness, and drive customer engagement in 2025.

# Your Blog Post Title Here
...rest of the blog content...

Write a high-quality blog post that would rank well and provide real value to readers."#,
        title = topic.title,
        primary = topic.primary_keywords,
        auxiliary = topic.auxiliary_keywords,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowId;

    #[test]
    fn test_prompt_includes_topic_fields() {
        let topic = TopicRecord {
            row: RowId::Row(1),
            primary_keywords: "rust async".to_string(),
            auxiliary_keywords: "tokio, futures".to_string(),
            title: "Async Rust in Production".to_string(),
        };

        let prompt = build_prompt(&topic);
        assert!(prompt.contains("Async Rust in Production"));
        assert!(prompt.contains("rust async"));
        assert!(prompt.contains("tokio, futures"));
        assert!(prompt.starts_with("Write an engaging"));
        assert!(prompt.contains("META_DESCRIPTION:"));
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "openai/gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 2000);
    }
}
