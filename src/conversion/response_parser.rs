//! Chat completion response to summary markdown
//!
//! Only `choices[0].message.content` is read. Anything missing along that
//! path is a format error carrying the raw body; no fallback text is made up.

use crate::core::error::SummaryError;
use crate::models::openai::ChatCompletionResponse;

/// Extract the first choice's message content from a raw response body
pub fn extract_summary(raw_body: &str) -> Result<String, SummaryError> {
    let format_error = |reason: String| SummaryError::ResponseFormat {
        reason,
        raw_body: raw_body.to_string(),
    };

    let response: ChatCompletionResponse = serde_json::from_str(raw_body)
        .map_err(|e| format_error(format!("response is not a chat completion: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| format_error("`choices` is empty".to_string()))?;

    choice
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| format_error("`choices[0].message.content` is missing".to_string()))
}
