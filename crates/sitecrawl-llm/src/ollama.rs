//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API (`POST /api/generate`).
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint, model, temperature and output length
//! - Retry logic with exponential backoff for transient failures
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use sitecrawl_llm::{OllamaConfig, OllamaProvider};
//! use sitecrawl_domain::traits::LlmProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OllamaProvider::new(OllamaConfig::default())?;
//! let text = provider.generate("Say hello").await?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use sitecrawl_domain::traits::LlmProvider as LlmProviderTrait;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3";

/// Default timeout for LLM requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Longest pause between two attempts (seconds)
const MAX_BACKOFF_SECS: u64 = 32;

/// Connection and sampling settings for Ollama
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// API endpoint, e.g. `http://localhost:11434`
    pub endpoint: String,

    /// Model to use, e.g. `llama3`
    pub model: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request before giving up
    pub max_retries: u32,

    /// Sampling temperature; low keeps cleaning close to the source text
    pub temperature: f32,

    /// Maximum tokens to generate (`num_predict`)
    pub max_tokens: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            temperature: 0.1,
            max_tokens: 4000,
        }
    }
}

impl OllamaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(format!("max_retries must be at most {}", MAX_RETRIES_LIMIT));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be within [0.0, 2.0]".to_string());
        }
        Ok(())
    }
}

/// Ollama API provider for local LLM inference
///
/// Cloning is cheap: clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    config: OllamaConfig,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: OllamaConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a provider for `model` on the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(OllamaConfig {
            model: model.into(),
            ..OllamaConfig::default()
        })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries.clamp(1, MAX_RETRIES_LIMIT);
        self
    }

    /// Current configuration
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available (HTTP 404, not retried)
    /// - Network communication fails on every attempt
    /// - Response format is invalid
    async fn request(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'));

        let body = OllamaGenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            match self.client.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<OllamaGenerateResponse>()
                            .await
                            .map(|r| r.response)
                            .map_err(|e| {
                                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                            });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                let delay = backoff_delay(attempts);
                warn!(
                    "Ollama request failed (attempt {}/{}), retrying in {:?}",
                    attempts, self.config.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

/// Exponential backoff after the `attempt`-th failure: 1s, 2s, 4s, ... capped
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .unwrap_or(MAX_BACKOFF_SECS)
        .min(MAX_BACKOFF_SECS);
    Duration::from_secs(secs)
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        debug!("Ollama generate: model={}, prompt {} chars", self.config.model, prompt.len());
        self.request(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
