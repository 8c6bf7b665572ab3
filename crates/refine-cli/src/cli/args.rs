use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use refine_client::ClientConfig;
use refine_core::DEFAULT_LANGUAGE;
use refine_server::ServerConfig;

#[derive(Parser)]
#[command(
    name = "refine",
    version,
    about = "Ask a locally hosted model to improve a source file, and serve the greeting endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a source file to the model and write the improved version
    Review(ReviewArgs),
    /// Check that the model server answers
    Check(ModelArgs),
    /// Run the greeting endpoint (GET /?name=...)
    Serve(ServeArgs),
    Version,
}

/// Model server connection. Flags win over `REFINE_*` variables, which win
/// over the client defaults.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ModelArgs {
    /// Model server base URL
    /// Default: http://localhost:11434
    #[arg(long)]
    pub url: Option<String>,

    /// Model identifier
    /// Default: phi3:mini
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    /// Default: 0.2
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    /// Default: 600
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ModelArgs {
    pub fn client_config(&self) -> ClientConfig {
        self.apply(ClientConfig::from_env())
    }

    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config = config.with_timeout_secs(timeout_secs);
        }
        config
    }
}

#[derive(clap::Args, Clone, Debug)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Source file to improve
    #[arg(long, default_value = "original_app.py")]
    pub input: PathBuf,

    /// Where the improved code is written (overwritten)
    #[arg(long, default_value = "improved_app.py")]
    pub output: PathBuf,

    /// Source language; preferred code fence tag
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ServeArgs {
    /// Listen address
    /// Default: 127.0.0.1:5000
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        self.apply(ServerConfig::from_env())
    }

    fn apply(&self, config: ServerConfig) -> ServerConfig {
        match self.bind {
            Some(bind) => config.with_bind(bind),
            None => config,
        }
    }
}
