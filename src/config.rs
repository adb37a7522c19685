//! Runtime configuration, read from the environment and overridden by flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::llm::RetryPolicy;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
pub const DEFAULT_COLLECTION_FILE: &str = "notes.json";
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt"];

/// Connection settings for the chat-completions service.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL without the `/v1/...` path.
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Everything an `ingest` run needs besides its inputs.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub model: ModelConfig,
    /// Total attempts per external call, first try included.
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    /// Pause after each processed input; zero disables pacing.
    pub pace_ms: u64,
    /// File extensions (without the dot) treated as sources.
    pub extensions: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            pace_ms: 0,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base) = get("NOTEKEEP_API_BASE") {
            config.model.api_base = base.trim_end_matches('/').to_string();
        }

        config.model.api_key = get("NOTEKEEP_API_KEY").or_else(|| get("OPENAI_API_KEY"));

        if let Some(model) = get("NOTEKEEP_MODEL") {
            config.model.model = model;
        }

        if let Some(seconds) = get("NOTEKEEP_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            config.model.timeout_seconds = seconds.clamp(5, 300);
        }

        if let Some(attempts) = get("NOTEKEEP_MAX_ATTEMPTS").and_then(|v| v.parse::<u32>().ok()) {
            config.max_attempts = attempts.clamp(1, 10);
        }

        if let Some(ms) = get("NOTEKEEP_RETRY_DELAY_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.retry_delay_ms = ms;
        }

        if let Some(ms) = get("NOTEKEEP_PACE_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.pace_ms = ms;
        }

        config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn pacing(&self) -> Option<Duration> {
        (self.pace_ms > 0).then(|| Duration::from_millis(self.pace_ms))
    }
}

/// Resolve the collection file: flag, then `NOTEKEEP_FILE`, then the default.
pub fn collection_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        std::env::var("NOTEKEEP_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_COLLECTION_FILE))
}
