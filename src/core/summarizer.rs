//! Summary client
//!
//! Reads the input files, sends one chat completion request, and returns the
//! markdown the model produced. Every call is independent: no retries, no
//! state carried between calls.

use crate::conversion::request_builder::{build_request, combine_inputs, read_inputs};
use crate::conversion::response_parser::extract_summary;
use crate::core::constants::AUTO_MODEL;
use crate::core::error::SummaryError;
use crate::core::provider::{Provider, ProviderError};
use crate::models::summary::{ModelInfo, SummaryRequest, SummaryResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Client producing markdown summaries through a provider
pub struct SummaryClient {
    provider: Arc<dyn Provider>,
    instruction: String,
}

impl SummaryClient {
    pub fn new(provider: Arc<dyn Provider>, instruction: impl Into<String>) -> Self {
        Self {
            provider,
            instruction: instruction.into(),
        }
    }

    /// Summarize the request's files with the request's model
    ///
    /// # Errors
    ///
    /// - `SummaryError::Io` if any file cannot be read as UTF-8; nothing is
    ///   sent in that case
    /// - `SummaryError::Network` if the server cannot be reached, times out,
    ///   or answers with a non-success status
    /// - `SummaryError::ResponseFormat` if the body lacks
    ///   `choices[0].message.content`
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, SummaryError> {
        let inputs = read_inputs(request.files()).await?;
        let combined = combine_inputs(&inputs);
        let chat_request = build_request(request.model(), &combined, &self.instruction);

        info!(
            "📤 Requesting summary: model={}, files={}, prompt_chars={}",
            request.model(),
            inputs.len(),
            combined.len()
        );

        let raw_body = self.provider.create_chat_completion(&chat_request).await?;
        debug!("Response body: {} bytes", raw_body.len());

        let markdown = extract_summary(&raw_body)?;
        info!("📥 Summary received: {} chars", markdown.len());

        Ok(SummaryResult::new(markdown))
    }

    /// Models known to the server
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        self.provider.list_models().await
    }

    /// Resolve `auto` to a concrete model; any other name passes through
    ///
    /// `auto` picks the first loaded model, or the first listed one if none
    /// is loaded.
    pub async fn resolve_model(&self, requested: &str) -> Result<String, SummaryError> {
        if requested != AUTO_MODEL {
            return Ok(requested.to_string());
        }

        let models = self.list_models().await?;
        let chosen = models
            .iter()
            .find(|model| model.loaded)
            .or_else(|| models.first())
            .ok_or_else(|| {
                SummaryError::InvalidRequest(format!(
                    "{} reports no models to choose from",
                    self.provider.provider_name()
                ))
            })?;

        info!("Using model {} (loaded: {})", chosen.id, chosen.loaded);
        Ok(chosen.id.clone())
    }
}
