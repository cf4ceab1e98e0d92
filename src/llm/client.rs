use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiError, ChatRequest, ChatResponse, Message, Sampling};

const API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "anthropic/claude-3.5-haiku";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const APP_TITLE: &str = "medscout";

const KEY_VARS: [&str; 2] = ["OPENROUTER_API_KEY", "OPEN_ROUTER_DEV_API_KEY"];

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OPENROUTER_API_KEY not set")]
    ApiKeyNotSet,

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

/// Single-prompt text generation. Implemented by `OpenRouterClient` for
/// production; test doubles script the replies.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Chat-completions client for OpenRouter. No retries: enrichment is best-effort.
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn from_env(http: Client) -> Result<Self, LlmError> {
        let api_key = KEY_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
            .ok_or(LlmError::ApiKeyNotSet)?;
        let model = env::var("OPENROUTER_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            http,
            api_key: ApiKey(api_key),
            model,
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("OpenRouter rate limited");
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ChatResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err, status.as_u16());
                warn!(error = %classified, "OpenRouter API error");
                return Err(classified);
            }
            let snippet: String = text.chars().take(200).collect();
            warn!(status = %status, "OpenRouter API error (no structured body)");
            return Err(classify_status(status.as_u16(), format!("HTTP {status}: {snippet}")));
        }

        let body: ChatResponse = response.json().await?;

        if let Some(err) = &body.error {
            let classified = classify_api_error(err, status.as_u16());
            warn!(error = %classified, "OpenRouter API error in 200 response");
            return Err(classified);
        }

        let text = body.first_text().ok_or(LlmError::EmptyResponse)?;
        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text.to_string())
    }
}

fn classify_api_error(err: &ApiError, status: u16) -> LlmError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    classify_status(err.code.unwrap_or(status), message)
}

fn classify_status(code: u16, message: String) -> LlmError {
    match code {
        429 => LlmError::RateLimited,
        401 | 403 => LlmError::Unauthorized(message),
        _ => LlmError::Api { code, message },
    }
}
