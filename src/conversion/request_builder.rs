//! Input files to chat completion request
//!
//! Reads the input files in order, joins them into one prompt, and wraps the
//! prompt in a single user message.

use crate::core::constants::{prompt, role};
use crate::core::error::SummaryError;
use crate::models::openai::{ChatCompletionRequest, ChatMessage};
use std::path::PathBuf;
use tracing::debug;

/// One input file and its text
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub content: String,
}

impl InputFile {
    /// Base name used in the separator line
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Read every path as UTF-8, in order, stopping at the first failure
pub async fn read_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>, SummaryError> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SummaryError::Io {
                path: path.clone(),
                source,
            })?;
        debug!("Read {} ({} bytes)", path.display(), content.len());
        inputs.push(InputFile {
            path: path.clone(),
            content,
        });
    }
    Ok(inputs)
}

/// Join file contents into one prompt
///
/// A single file is passed through untouched. With several files each one is
/// preceded by `\n\n--- File: <basename> ---\n\n`.
pub fn combine_inputs(inputs: &[InputFile]) -> String {
    if let [only] = inputs {
        return only.content.clone();
    }

    let mut combined = String::new();
    for input in inputs {
        combined.push_str(&separator_for(&input.display_name()));
        combined.push_str(&input.content);
    }
    combined
}

fn separator_for(name: &str) -> String {
    format!(
        "{}{}{}",
        prompt::FILE_SEPARATOR_PREFIX,
        name,
        prompt::FILE_SEPARATOR_SUFFIX
    )
}

/// Wrap the combined prompt in a single-message chat completion request
pub fn build_request(model: &str, combined: &str, instruction: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: role::USER.to_string(),
            content: format!("{}\n\n{}", instruction.trim_end(), combined),
        }],
    }
}
