//! Sitecrawl LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `sitecrawl-domain`. The
//! crawl pipeline talks to an LLM twice: once per run to derive keywords from
//! the root page, and once per page to strip navigation and other noise.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use sitecrawl_llm::MockProvider;
//! use sitecrawl_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use sitecrawl_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{OllamaConfig, OllamaProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are matched by substring against the prompt, first registered rule
/// wins; unmatched prompts get the default response. No network calls.
///
/// # Examples
///
/// ```
/// use sitecrawl_llm::MockProvider;
/// use sitecrawl_domain::traits::LlmProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut provider = MockProvider::default();
/// provider.add_response("keywords", r#"{"keywords": ["docs"]}"#);
/// provider.add_error("explode");
///
/// assert_eq!(provider.generate("list keywords").await.unwrap(), r#"{"keywords": ["docs"]}"#);
/// assert!(provider.generate("please explode").await.is_err());
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Reply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` to prompts containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((fragment.into(), Reply::Text(response.into())));
    }

    /// Fail prompts containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((fragment.into(), Reply::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }

    fn reply_to(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let rules = self.rules.lock().unwrap();
        match rules.iter().find(|(fragment, _)| prompt.contains(fragment.as_str())) {
            Some((_, Reply::Text(response))) => Ok(response.clone()),
            Some((_, Reply::Error)) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply_to(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
