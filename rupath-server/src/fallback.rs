//! Language model fallback for questions the datasets cannot answer

use std::time::Duration;

use rupath_core::chat::DEFAULT_FALLBACK_MESSAGE;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::FallbackConfig;

const SYSTEM_PROMPT: &str = "You are RU-PATH, a Rutgers New Brunswick Parking & Transit assistant. \
     Use real Rutgers rules when possible; if unsure, say you are unsure \
     and recommend checking the official Rutgers website or app.";

const CALL_FAILED_MESSAGE: &str = "I couldn't answer that from the RU-PATH JSON data, and the \
     language model fallback failed. Please double-check using the official Rutgers \
     Parking & Transportation website.";

#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("empty completion")]
    EmptyCompletion,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// Client for an OpenAI-compatible chat completions API
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    pub fn new(config: &FallbackConfig, api_key: String) -> Result<Self, FallbackError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    /// Client from the configured API key variable. `None` when the fallback
    /// is disabled or the key is not set.
    pub fn from_env(config: &FallbackConfig) -> Option<Self> {
        if !config.enabled {
            info!("Language model fallback disabled in config");
            return None;
        }
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                info!(
                    "{} not set, language model fallback disabled",
                    config.api_key_env
                );
                return None;
            }
        };
        match Self::new(config, api_key) {
            Ok(client) => {
                info!("Language model fallback enabled ({})", client.model);
                Some(client)
            }
            Err(e) => {
                warn!("Failed to build language model client: {e}");
                None
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, message: &str) -> Result<String, FallbackError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": &self.model,
                "max_tokens": self.max_tokens,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": message},
                ]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FallbackError::Status { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(FallbackError::EmptyCompletion)
    }
}

/// Final text for a turn the datasets could not answer.
///
/// Without a client the local `hint` (or a fixed pointer to the official
/// website) is used. A failed call keeps the hint and notes the error.
pub async fn resolve_fallback(
    client: Option<&LlmClient>,
    message: &str,
    hint: Option<String>,
) -> String {
    let Some(client) = client else {
        return hint.unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string());
    };

    match client.complete(message).await {
        Ok(text) => {
            debug!("Answered by language model fallback");
            text
        }
        Err(e) => {
            warn!("Language model fallback failed: {e}");
            match hint {
                Some(hint) => format!("{hint}\n\n(Language model fallback error: {e})"),
                None => CALL_FAILED_MESSAGE.to_string(),
            }
        }
    }
}
