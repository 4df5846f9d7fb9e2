//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crawl run error
    #[error("{0}")]
    Crawl(#[from] sitecrawl_orchestrator::OrchestratorError),

    /// Progress state error
    #[error("{0}")]
    Tracker(#[from] sitecrawl_store::TrackerError),

    /// HTTP fetch error
    #[error("{0}")]
    Fetch(#[from] sitecrawl_fetch::FetchError),

    /// LLM provider error
    #[error("{0}")]
    Llm(#[from] sitecrawl_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
