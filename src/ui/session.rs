//! One summarize-and-display cycle
//!
//! Holds the request, the latest summary, and the display theme that the
//! presenter actions act on.

use crate::core::constants::output;
use crate::core::error::SummaryError;
use crate::core::summarizer::SummaryClient;
use crate::models::summary::{SummaryRequest, SummaryResult};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
        }
    }
}

#[derive(Debug)]
pub struct SummarySession {
    request: SummaryRequest,
    result: SummaryResult,
    theme: Theme,
}

impl SummarySession {
    pub fn new(request: SummaryRequest, result: SummaryResult, theme: Theme) -> Self {
        Self {
            request,
            result,
            theme,
        }
    }

    pub fn request(&self) -> &SummaryRequest {
        &self.request
    }

    pub fn markdown(&self) -> &str {
        self.result.markdown()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Suggested save location, next to the first input file
    ///
    /// `<stem>_summary.md` for one input, `combined_summary.md` for several.
    pub fn default_save_path(&self) -> PathBuf {
        let first = self.request.first_file();
        let name = if self.request.files().len() == 1 {
            let stem = first
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "summary".to_string());
            format!("{}{}", stem, output::SINGLE_SUFFIX)
        } else {
            output::COMBINED_NAME.to_string()
        };

        match first.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Write the markdown verbatim as UTF-8
    ///
    /// A failed write leaves the session untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.markdown())
            .with_context(|| format!("Failed to save summary to {}", path.display()))?;
        info!("💾 Saved summary to {}", path.display());
        Ok(())
    }

    /// Run the same request again
    ///
    /// On failure the previous summary is kept and the error returned.
    pub async fn retry(&mut self, client: &SummaryClient) -> Result<(), SummaryError> {
        match client.summarize(&self.request).await {
            Ok(result) => {
                self.result = result;
                Ok(())
            }
            Err(e) => {
                warn!("Retry failed, keeping previous summary: {}", e);
                Err(e)
            }
        }
    }
}
