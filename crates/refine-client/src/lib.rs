//! Chat client for a locally hosted model server.
//!
//! Speaks the Ollama chat protocol: one non-streaming `POST /api/chat` per
//! call, reply text read from `message.content`. There are no retries; a
//! transport failure or non-2xx status is returned to the caller as is.
//!
//! # Quick Start
//!
//! ```no_run
//! use refine_client::{ChatModel, ClientConfig, ModelClient};
//! use refine_core::ChatMessage;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ModelClient::new(ClientConfig::from_env())?;
//! let text = client.chat(&[ChatMessage::user("Say hi")]).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads these; unset or unparsable values keep the
//! default.
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `REFINE_MODEL_URL` | Model server base URL (default: `http://localhost:11434`) |
//! | `REFINE_MODEL` | Model identifier (default: `phi3:mini`) |
//! | `REFINE_TEMPERATURE` | Sampling temperature (default: 0.2) |
//! | `REFINE_TIMEOUT` | Request timeout in seconds (default: 600) |

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatModel, ModelClient, CLIENT_USER_AGENT};
pub use error::{ClientError, ClientResult};
pub use types::{ChatOptions, ChatRequest, ChatResponse, ClientConfig, ResponseMessage};
