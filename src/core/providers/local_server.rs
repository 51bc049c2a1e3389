//! Local inference server provider (llama-server, Ollama, or any
//! OpenAI-compatible endpoint without authentication)

use crate::core::constants::{endpoint, server};
use crate::core::provider::{Provider, ProviderError};
use crate::models::openai::{ChatCompletionRequest, ModelListResponse};
use crate::models::summary::ModelInfo;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Provider for a server on the local machine
pub struct LocalServerProvider {
    client: Client,
    base_url: String,
}

impl LocalServerProvider {
    /// Create a new local server provider
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server root, e.g. `http://localhost:11434`
    /// * `timeout` - Request timeout in seconds; 0 disables it
    /// * `connect_timeout` - Connect timeout in seconds
    pub fn new(base_url: String, timeout: u64, connect_timeout: u64) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(connect_timeout));
        if timeout > 0 {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Unexpected(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a transport failure onto the provider error taxonomy
    fn classify_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(error.to_string())
        } else if error.is_connect() {
            ProviderError::Unreachable(format!(
                "{} ({}). Is the inference server running?",
                self.base_url, error
            ))
        } else {
            ProviderError::Unexpected(error.to_string())
        }
    }

    /// Read the body of a response, failing on a non-success status
    async fn read_body(&self, response: reqwest::Response) -> Result<String, ProviderError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_error(e))?;

        if !status.is_success() {
            warn!("Inference server returned status {}", status.as_u16());
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Provider for LocalServerProvider {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, ProviderError> {
        let url = self.url(endpoint::CHAT_COMPLETIONS);
        debug!("POST {} model={}", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        self.read_body(response).await
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let url = self.url(endpoint::MODELS);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let body = self.read_body(response).await?;
        let listing: ModelListResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse model list: {}", e)))?;

        Ok(listing
            .data
            .into_iter()
            .map(|entry| ModelInfo {
                loaded: entry
                    .status
                    .is_some_and(|status| status.value == server::STATUS_LOADED),
                id: entry.id,
            })
            .collect())
    }

    fn provider_name(&self) -> &str {
        "Local inference server"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::role;
    use crate::models::openai::ChatMessage;
    use crate::test_support::{
        mock_chat_server, mock_models_server, slow_chat_server, unused_base_url,
    };
    use axum::http::StatusCode;

    fn sample_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "llama3".to_string(),
            messages: vec![ChatMessage {
                role: role::USER.to_string(),
                content: "hello".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_posts_json_body_and_returns_raw_text() {
        let server = mock_chat_server(vec![(StatusCode::OK, r#"{"choices":[]}"#)]).await;
        let provider = LocalServerProvider::new(server.base_url.clone(), 5, 5).unwrap();

        let body = provider.create_chat_completion(&sample_request()).await.unwrap();
        assert_eq!(body, r#"{"choices":[]}"#);

        let sent: serde_json::Value = serde_json::from_str(&server.requests()[0]).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server =
            mock_chat_server(vec![(StatusCode::NOT_FOUND, r#"{"error":"model not found"}"#)]).await;
        let provider = LocalServerProvider::new(server.base_url.clone(), 5, 5).unwrap();

        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        match err {
            ProviderError::ApiError { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("model not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let provider = LocalServerProvider::new(unused_base_url().await, 5, 5).unwrap();
        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let base_url = slow_chat_server(Duration::from_secs(3), r#"{"choices":[]}"#).await;
        let provider = LocalServerProvider::new(base_url, 1, 5).unwrap();

        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_waits_for_slow_response() {
        let base_url = slow_chat_server(Duration::from_millis(1500), r#"{"choices":[]}"#).await;
        let provider = LocalServerProvider::new(base_url, 0, 5).unwrap();

        let body = provider.create_chat_completion(&sample_request()).await.unwrap();
        assert_eq!(body, r#"{"choices":[]}"#);
    }

    #[tokio::test]
    async fn test_list_models_reads_load_status() {
        let server = mock_models_server(
            r#"{"data":[
                {"id":"qwen","status":{"value":"unloaded"}},
                {"id":"llama3","status":{"value":"loaded"}},
                {"id":"plain"}
            ]}"#,
        )
        .await;
        let provider = LocalServerProvider::new(server, 5, 5).unwrap();

        let models = provider.list_models().await.unwrap();
        assert_eq!(
            models,
            vec![
                ModelInfo { id: "qwen".to_string(), loaded: false },
                ModelInfo { id: "llama3".to_string(), loaded: true },
                ModelInfo { id: "plain".to_string(), loaded: false },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_models_rejects_bad_json() {
        let server = mock_models_server("not json").await;
        let provider = LocalServerProvider::new(server, 5, 5).unwrap();
        let err = provider.list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider =
            LocalServerProvider::new("http://localhost:11434/".to_string(), 0, 5).unwrap();
        assert_eq!(
            provider.url(endpoint::CHAT_COMPLETIONS),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
