//! Google Sheets topic source.
//!
//! Reads three fixed columns (primary keywords, auxiliary keywords, title)
//! starting at the second row of a pre-identified spreadsheet via the
//! Sheets v4 values API. Row identifiers are the 1-based offset within
//! that data range, so "row 1" is spreadsheet row 2.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::domain::{RowId, TopicRecord};

use super::TopicSource;

/// Range holding the topic data: primary keywords, auxiliary keywords, title
const TOPIC_RANGE: &str = "A2:C";

/// Google Sheets values API client
pub struct SheetsClient {
    spreadsheet_id: String,
    api_key: String,
    client: reqwest::Client,
}

/// Response from the values endpoint
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    /// Create a new client for one spreadsheet
    pub fn new(spreadsheet_id: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Sheets HTTP client")?;

        Ok(Self {
            spreadsheet_id,
            api_key,
            client,
        })
    }

    /// Build the values API URL for a range
    fn values_url(&self, range: &str) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}",
            self.spreadsheet_id, range
        )
    }

    async fn fetch_range(&self, range: &str) -> Result<ValueRange> {
        let response = self
            .client
            .get(self.values_url(range))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to reach Google Sheets")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API returned {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Sheets response")
    }
}

/// Convert raw sheet rows into topic records.
///
/// Rows missing any of the three columns are skipped, but still consume
/// their 1-based offset so row identifiers stay aligned with the sheet.
fn rows_to_topics(values: &[Vec<String>]) -> Vec<TopicRecord> {
    values
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() >= 3)
        .map(|(i, row)| TopicRecord {
            row: RowId::Row(i as u32 + 1),
            primary_keywords: row[0].clone(),
            auxiliary_keywords: row[1].clone(),
            title: row[2].clone(),
        })
        .collect()
}

#[async_trait]
impl TopicSource for SheetsClient {
    async fn list_topics(&self) -> Result<Vec<TopicRecord>> {
        let range = self.fetch_range(TOPIC_RANGE).await?;
        let topics = rows_to_topics(&range.values);

        info!(count = topics.len(), "Loaded blog topics from Google Sheets");

        Ok(topics)
    }
}
