//! Configuration for blogsmith.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (secrets always come from here)
//! 2. Config file (blogsmith.yaml, searched upward from the current dir)
//! 3. Defaults
//!
//! Secrets (API keys, WordPress credentials) are never read from the
//! config file. A `.env` file in the working directory is honored via
//! dotenvy before any variable is read.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default completion model
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default markdown output directory
pub const DEFAULT_OUTPUT_DIR: &str = "blog_posts";

/// Fixed per-request timeout for every external call
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Spreadsheet holding the topic rows
    pub spreadsheet_id: Option<String>,

    /// Completion model identifier
    pub model: Option<String>,

    /// Markdown output directory
    pub output_dir: Option<String>,

    /// WordPress XML-RPC endpoint
    pub wordpress_url: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_seconds: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub spreadsheet_id: String,
    pub sheets_api_key: String,
    pub openrouter_api_key: String,
    pub model: String,
    pub output_dir: PathBuf,
    pub wordpress_url: String,
    pub wordpress_username: String,
    pub wordpress_password: String,
    pub request_timeout: Duration,
}

/// Find blogsmith.yaml by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join("blogsmith.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Fatal when a required secret is missing; WordPress credentials may
    /// be empty and are only validated when publishing is requested.
    pub fn load() -> Result<Self> {
        // .env is optional; ignore a missing file
        let _ = dotenvy::dotenv();

        let file = match find_config_file() {
            Some(path) => load_config_file(&path)?,
            None => ConfigFile::default(),
        };

        let spreadsheet_id = env_var("SPREADSHEET_ID")
            .or(file.spreadsheet_id)
            .context("SPREADSHEET_ID not set (env or blogsmith.yaml)")?;

        let sheets_api_key = env_var("SHEETS_API_KEY")
            .context("SHEETS_API_KEY not found in environment")?;

        let openrouter_api_key = env_var("OPENROUTER_API_KEY")
            .context("OPENROUTER_API_KEY not found in environment")?;

        let model = env_var("BLOGSMITH_MODEL")
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let output_dir = env_var("BLOGSMITH_OUTPUT_DIR")
            .or(file.output_dir)
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let wordpress_url = env_var("WORDPRESS_URL")
            .or(file.wordpress_url)
            .unwrap_or_default();

        let timeout_secs = file
            .request_timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            spreadsheet_id,
            sheets_api_key,
            openrouter_api_key,
            model,
            output_dir: PathBuf::from(output_dir),
            wordpress_url,
            wordpress_username: env_var("WORDPRESS_USERNAME").unwrap_or_default(),
            wordpress_password: env_var("WORDPRESS_PASSWORD").unwrap_or_default(),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
