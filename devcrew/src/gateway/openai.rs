//! OpenAI-compatible chat completions gateway.

use crate::errors::GatewayError;
use crate::gateway::ModelGateway;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the OpenAI-compatible gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL of the API, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds. Expiry surfaces as a transient error.
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Creates a config with default model settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 120,
        }
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// A `ModelGateway` backed by an OpenAI-compatible `/chat/completions`
/// endpoint.
#[derive(Debug)]
pub struct OpenAiGateway {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGateway {
    /// Creates a gateway from a config.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::fatal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn classify_status(status: reqwest::StatusCode, body: &str) -> GatewayError {
        // 429 and 5xx are worth retrying; everything else 4xx is a problem
        // with the request itself.
        if status.as_u16() == 429 || status.is_server_error() {
            GatewayError::transient(format!("HTTP {status}: {body}"))
        } else {
            GatewayError::fatal(format!("HTTP {status}: {body}"))
        }
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // Timeouts and connection errors are retryable.
                GatewayError::transient(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::transient(format!("malformed response body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::transient("response contained no choices".to_string()))
    }
}
