//! HTTP client for the model server.

use std::time::Duration;

use async_trait::async_trait;
use refine_core::ChatMessage;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::types::{ChatOptions, ChatRequest, ChatResponse, ClientConfig};

/// User agent sent with every request.
pub const CLIENT_USER_AGENT: &str = concat!("refine-client/", env!("CARGO_PKG_VERSION"));

/// Something that turns a conversation into one reply text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage]) -> ClientResult<String>;

    fn model_name(&self) -> &str;
}

/// Client for an Ollama-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct ModelClient {
    client: reqwest::Client,
    base_url: String,
    config: ClientConfig,
}

impl ModelClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ClientError::Config {
            message: format!("invalid model server url '{}': {}", config.url, e),
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the server answers `GET /api/tags` with a 2xx status.
    ///
    /// Transport failures count as unreachable rather than as errors.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        debug!(url = %url, "probing model server");

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(url = %url, error = %e, "model server unreachable");
                false
            }
        }
    }

    async fn send_chat(&self, messages: &[ChatMessage]) -> ClientResult<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            stream: false,
            options: ChatOptions {
                temperature: self.config.temperature,
            },
        };

        debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat request"
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
                message: format!("expected message.content in chat response: {}", e),
            })?;

        debug!(chars = parsed.message.content.len(), "chat reply received");
        Ok(parsed.message.content)
    }
}

#[async_trait]
impl ChatModel for ModelClient {
    async fn chat(&self, messages: &[ChatMessage]) -> ClientResult<String> {
        self.send_chat(messages).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
