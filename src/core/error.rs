//! Error taxonomy of a summarize call

use crate::core::provider::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a summarize call
///
/// None of these are retried internally.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to inference server failed: {0}")]
    Network(#[from] ProviderError),

    #[error("Unexpected response format: {reason}")]
    ResponseFormat { reason: String, raw_body: String },
}

impl SummaryError {
    /// Raw server body for a format error, for diagnosis
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            SummaryError::ResponseFormat { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }
}
