//! In-process stand-ins for the inference server

use crate::core::constants::endpoint;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Chat completion server that replays canned responses
pub struct MockChatServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockChatServer {
    /// Bodies received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start a server answering the n-th chat request with `responses[n]`;
/// the last response repeats once the list is exhausted
pub async fn mock_chat_server(responses: Vec<(StatusCode, &str)>) -> MockChatServer {
    let responses: Arc<Vec<(StatusCode, String)>> = Arc::new(
        responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();

    let app = Router::new().route(
        endpoint::CHAT_COMPLETIONS,
        post(move |payload: String| {
            let captured = captured.clone();
            let responses = responses.clone();
            async move {
                let index = {
                    let mut seen = captured.lock().unwrap();
                    seen.push(payload);
                    seen.len() - 1
                };
                let (status, body) = responses[index.min(responses.len() - 1)].clone();
                (status, [("content-type", "application/json")], body)
            }
        }),
    );

    MockChatServer {
        base_url: serve(app).await,
        requests,
    }
}

/// Start a chat server that waits `delay` before answering with `body`
pub async fn slow_chat_server(delay: Duration, body: &str) -> String {
    let body = body.to_string();
    let app = Router::new().route(
        endpoint::CHAT_COMPLETIONS,
        post(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (StatusCode::OK, [("content-type", "application/json")], body)
            }
        }),
    );
    serve(app).await
}

/// Start a server answering `GET /v1/models` with `body`
pub async fn mock_models_server(body: &str) -> String {
    let body = body.to_string();
    let app = Router::new().route(
        endpoint::MODELS,
        get(move || {
            let body = body.clone();
            async move { (StatusCode::OK, [("content-type", "application/json")], body) }
        }),
    );
    serve(app).await
}

/// Base URL of a port nothing listens on
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
