//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! All values are validated when loaded so a bad file fails before any
//! request is sent.

use crate::core::constants::{prompt, server};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 300;

/// Default connect timeout in seconds
const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default configuration file name, looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Whole-request timeout; 0 disables it
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instruction: default_instruction(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            clipboard_command: default_clipboard_command(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_instruction() -> String {
    prompt::DEFAULT_INSTRUCTION.to_string()
}

fn default_clipboard_command() -> String {
    if cfg!(target_os = "macos") {
        "pbcopy".to_string()
    } else {
        "xclip -selection clipboard".to_string()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Inference server host
    pub host: String,

    /// Inference server port
    pub port: u16,

    /// Request timeout in seconds (0 = none)
    pub request_timeout: u64,

    /// Connect timeout in seconds
    pub connect_timeout: u64,

    /// Instruction text placed ahead of the file contents
    pub instruction: String,

    /// Start the presenter in dark mode
    pub dark_mode: bool,

    /// Command receiving the markdown on stdin for copy
    pub clipboard_command: String,

    /// Logging level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - Configuration values are invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        let toml_config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        let config = Self::from_toml(toml_config);
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load the configuration
    ///
    /// An explicit path must exist. Otherwise `CONFIG_PATH` is consulted, then
    /// `config.toml` in the working directory; if neither names an existing
    /// file the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var("CONFIG_PATH") {
            return Self::from_file(env_path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    fn from_toml(config: TomlConfig) -> Self {
        Config {
            host: config.server.host,
            port: config.server.port,
            request_timeout: config.request.timeout_secs,
            connect_timeout: config.request.connect_timeout_secs,
            instruction: config.prompt.instruction,
            dark_mode: config.display.dark_mode,
            clipboard_command: config.display.clipboard_command,
            log_level: config.logging.level,
        }
    }

    /// Check values that would otherwise fail only once a request is sent
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.instruction.trim().is_empty() {
            bail!("prompt.instruction must not be empty");
        }
        Ok(())
    }

    /// Root URL of the inference server, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [request]
            timeout_secs = 60
            connect_timeout_secs = 5

            [prompt]
            instruction = "Summarize as bullet points:"

            [display]
            dark_mode = true
            clipboard_command = "wl-copy"

            [logging]
            level = "debug"
        "#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, 60);
        assert_eq!(config.connect_timeout, 5);
        assert_eq!(config.instruction, "Summarize as bullet points:");
        assert!(config.dark_mode);
        assert_eq!(config.clipboard_command, "wl-copy");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 11434);
        assert_eq!(config.request_timeout, 300);
        assert_eq!(config.instruction, prompt::DEFAULT_INSTRUCTION);
        assert!(!config.dark_mode);
        assert_eq!(config.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let file = write_config("[server]\nport = 9000\n");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_rejects_zero_port() {
        let file = write_config("[server]\nport = 0\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_rejects_blank_instruction() {
        let file = write_config("[prompt]\ninstruction = \"   \"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(missing.as_path())).is_err());
    }
}
