use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::prompts::{self, GENERATE_SYSTEM, JUDGE_SYSTEM};
use super::{LlmError, LlmResult, NoteModel};
use crate::config::ModelConfig;

/// OpenAI-compatible chat-completions client.
pub struct ChatClient {
    client: Client,
    config: ModelConfig,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: ModelConfig) -> LlmResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Send one system/user exchange and return the reply text, if any.
    async fn complete(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
    ) -> LlmResult<Option<String>> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": 0.2,
            "max_tokens": max_tokens,
        });

        let url = self.endpoint();
        debug!(url = %url, model = %self.config.model, "sending chat completion");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RateLimited(body));
        }
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Server {
                status: status.as_u16(),
                message: body,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Client {
                status: status.as_u16(),
                message: body,
            });
        }

        let response_json: Value = response.json().await?;
        Ok(reply_content(&response_json))
    }
}

/// `choices[0].message.content`, if present and non-blank.
fn reply_content(response: &Value) -> Option<String> {
    response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl NoteModel for ChatClient {
    async fn judge(&self, text: &str, name_hint: &str) -> LlmResult<Option<String>> {
        self.complete(JUDGE_SYSTEM, prompts::judge_prompt(text, name_hint), 5)
            .await
    }

    async fn generate(
        &self,
        text: &str,
        name_hint: &str,
        created_at: DateTime<Utc>,
    ) -> LlmResult<Option<String>> {
        self.complete(
            GENERATE_SYSTEM,
            prompts::generation_prompt(text, name_hint, created_at),
            2000,
        )
        .await
    }
}
