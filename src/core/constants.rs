//! Constants for the chat-completion wire format and local server defaults
//!
//! This module defines string constants used throughout the application for
//! message roles, endpoint paths, and prompt composition.

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}

/// Endpoint path constants, relative to the server root
pub mod endpoint {
    /// Chat completion endpoint
    pub const CHAT_COMPLETIONS: &str = "/v1/chat/completions";

    /// Model listing endpoint
    pub const MODELS: &str = "/v1/models";
}

/// Local inference server defaults
pub mod server {
    /// Default host of the inference server
    pub const DEFAULT_HOST: &str = "localhost";

    /// Default port (llama-server / Ollama)
    pub const DEFAULT_PORT: u16 = 11434;

    /// Status value reported by `/v1/models` for a model held in memory
    pub const STATUS_LOADED: &str = "loaded";
}

/// Prompt composition constants
pub mod prompt {
    /// Instruction placed ahead of the combined file contents
    pub const DEFAULT_INSTRUCTION: &str = "Summarize concisely in Markdown:";

    /// Separator prefix written before each file when several are combined
    pub const FILE_SEPARATOR_PREFIX: &str = "\n\n--- File: ";

    /// Separator suffix written before each file when several are combined
    pub const FILE_SEPARATOR_SUFFIX: &str = " ---\n\n";
}

/// Saved summary naming
pub mod output {
    /// Suffix appended to the input file stem for a single-file summary
    pub const SINGLE_SUFFIX: &str = "_summary.md";

    /// File name used when several inputs were summarized together
    pub const COMBINED_NAME: &str = "combined_summary.md";
}

/// Model identifier that asks for the first loaded model on the server
pub const AUTO_MODEL: &str = "auto";
