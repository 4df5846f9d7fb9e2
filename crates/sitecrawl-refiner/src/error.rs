//! Error types for the refiner

use thiserror::Error;

/// Errors that can occur while generating keywords or cleaning content
#[derive(Error, Debug)]
pub enum RefineError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM call exceeded the configured timeout
    #[error("LLM call timed out after {0}s")]
    Timeout(u64),

    /// LLM returned nothing usable
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Response could not be read as a keyword set
    #[error("Invalid keyword format: {0}")]
    InvalidFormat(String),
}
