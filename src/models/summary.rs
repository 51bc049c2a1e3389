//! Summary request and result types

use crate::core::error::SummaryError;
use std::path::{Path, PathBuf};

/// Model identifier plus the ordered input files to summarize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    model: String,
    files: Vec<PathBuf>,
}

impl SummaryRequest {
    /// Build a request, rejecting an empty model or an empty file list
    pub fn new(model: impl Into<String>, files: Vec<PathBuf>) -> Result<Self, SummaryError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(SummaryError::InvalidRequest(
                "model identifier must not be empty".to_string(),
            ));
        }
        if files.is_empty() {
            return Err(SummaryError::InvalidRequest(
                "at least one input file is required".to_string(),
            ));
        }
        Ok(Self { model, files })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// First input file; always present
    pub fn first_file(&self) -> &Path {
        &self.files[0]
    }
}

/// Markdown produced by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    markdown: String,
}

impl SummaryResult {
    pub fn new(markdown: String) -> Self {
        Self { markdown }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }
}

/// A model advertised by the inference server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,
    pub loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_model() {
        let err = SummaryRequest::new("  ", vec![PathBuf::from("a.txt")]).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidRequest(_)));
    }

    #[test]
    fn test_request_requires_files() {
        let err = SummaryRequest::new("llama3", Vec::new()).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidRequest(_)));
    }

    #[test]
    fn test_request_keeps_order() {
        let files = vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")];
        let request = SummaryRequest::new("llama3", files.clone()).unwrap();
        assert_eq!(request.model(), "llama3");
        assert_eq!(request.files(), files.as_slice());
        assert_eq!(request.first_file(), Path::new("b.txt"));
    }
}
