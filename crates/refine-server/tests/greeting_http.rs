//! Greeting endpoint over a real socket.

use std::net::SocketAddr;

use refine_server::{serve_listener, Greeting};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_listener(listener, async move {
            let _ = stopped.await;
        }));
        Self { addr, stop, handle }
    }

    fn url(&self, query: &str) -> String {
        format!("http://{}/{}", self.addr, query)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned error");
    }
}

#[tokio::test]
async fn accepted_name_gets_json_greeting() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("?name=Mohammad")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("application/json"));
    let body: Greeting = response.json().await.unwrap();
    assert_eq!(body.message, "Hello, Mohammad!");

    let response = reqwest::get(server.url("?name=Ada%20Lovelace")).await.unwrap();
    let body: Greeting = response.json().await.unwrap();
    assert_eq!(body.message, "Hello, Ada Lovelace!");

    server.shutdown().await;
}

#[tokio::test]
async fn missing_or_empty_name_is_400() {
    let server = TestServer::start().await;

    for query in ["", "?name=", "?other=1"] {
        let response = reqwest::get(server.url(query)).await.unwrap();
        assert_eq!(response.status(), 400, "query {query:?}");
        assert_eq!(response.text().await.unwrap(), "Name is required");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn invalid_name_is_400_with_reason() {
    let server = TestServer::start().await;

    for query in ["?name=R2D2", "?name=%3Cscript%3E", "?name=bob!"] {
        let response = reqwest::get(server.url(query)).await.unwrap();
        assert_eq!(response.status(), 400, "query {query:?}");
        let text = response.text().await.unwrap();
        assert!(text.starts_with("Invalid input"), "got {text:?}");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn other_paths_are_not_routed() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.url("hello?name=Ada")).await.unwrap();
    assert_eq!(response.status(), 404);

    server.shutdown().await;
}
