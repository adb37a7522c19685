//! Boundary to the external judgment and generation service.

mod client;
pub mod prompts;
mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use client::ChatClient;
pub use retry::{RetryPolicy, RetryingModel};

pub type LlmResult<T> = std::result::Result<T, LlmError>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key not configured. Set NOTEKEEP_API_KEY or OPENAI_API_KEY.")]
    MissingApiKey,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Request rejected {status}: {message}")]
    Client { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Rate limits, server faults and transport failures are worth another try.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Server { .. } | Self::Transport(_)
        )
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::MalformedResponse(e.to_string())
        } else {
            LlmError::Transport(e.to_string())
        }
    }
}

/// The two questions the pipeline asks about each input.
///
/// Both may legitimately return `Ok(None)` when the service answers without
/// content.
#[async_trait]
pub trait NoteModel: Send + Sync {
    /// Short free-text verdict on whether `text` is worth keeping.
    async fn judge(&self, text: &str, name_hint: &str) -> LlmResult<Option<String>>;

    /// A JSON-shaped note candidate for `text`, possibly wrapped in noise.
    async fn generate(
        &self,
        text: &str,
        name_hint: &str,
        created_at: DateTime<Utc>,
    ) -> LlmResult<Option<String>>;
}
