//! Provider abstraction over the inference server
//!
//! This module defines the trait the summary client talks to. The one
//! production implementation lives in `providers::local_server`.

use crate::models::openai::ChatCompletionRequest;
use crate::models::summary::ModelInfo;
use async_trait::async_trait;
use thiserror::Error;

/// Error types for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Inference server unreachable: {0}")]
    Unreachable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Trait for chat-completion backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a chat completion request and return the raw response body
    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, ProviderError>;

    /// List the models the server can serve
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
