//! Wire types for the chat protocol, and client configuration.

use refine_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Always false; the client reads one complete reply.
    pub stream: bool,
    pub options: ChatOptions,
}

/// Sampling options.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub temperature: f32,
}

/// Response from `POST /api/chat` (only the fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ResponseMessage,
}

/// The generated message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the model server.
    #[serde(default = "default_url")]
    pub url: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "phi3:mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout() -> u64 {
    600
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `REFINE_MODEL_URL` | Model server base URL |
    /// | `REFINE_MODEL` | Model identifier |
    /// | `REFINE_TEMPERATURE` | Sampling temperature |
    /// | `REFINE_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("REFINE_MODEL_URL").unwrap_or_else(default_url),
            model: lookup("REFINE_MODEL").unwrap_or_else(default_model),
            temperature: lookup("REFINE_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_temperature),
            timeout_secs: lookup("REFINE_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
