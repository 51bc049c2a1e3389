//! OpenAI-compatible API data models
//!
//! This module defines the request and response structures for the chat
//! completion and model listing endpoints of a local inference server.
//! Response types only declare the fields this tool reads; everything else
//! the server sends is ignored.

use serde::{Deserialize, Serialize};

/// Chat message sent to the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// One generated choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Message of a generated choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Model listing response (`GET /v1/models`)
#[derive(Debug, Clone, Deserialize)]
pub struct ModelListResponse {
    pub data: Vec<ModelEntry>,
}

/// One listed model
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub status: Option<ModelStatus>,
}

/// Load status of a listed model (llama-server router mode)
#[derive(Debug, Clone, Deserialize)]
pub struct ModelStatus {
    pub value: String,
}
