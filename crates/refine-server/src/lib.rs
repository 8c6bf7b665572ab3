//! Greeting endpoint.
//!
//! One route: `GET /?name=<name>`.
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | name accepted | 200 | `{"message": "Hello, <name>!"}` |
//! | name missing or invalid | 400 | plain-text reason |
//! | validation could not run | 500 | error text |

pub mod config;
pub mod handlers;

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

pub use config::ServerConfig;
pub use handlers::{greet, Greeting};

pub fn router() -> Router {
    Router::new().route("/", get(greet))
}

/// Bind `config.bind` and serve until `shutdown` resolves.
pub async fn serve<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind).await?;
    serve_listener(listener, shutdown).await
}

/// Serve on an already bound listener.
pub async fn serve_listener<F>(listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("greeting server stopped");
    Ok(())
}
