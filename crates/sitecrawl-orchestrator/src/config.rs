//! Configuration for the driving loop
//!
//! Defines per-stage timeouts, the retry bound and the polite delay between
//! requests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the orchestrator
///
/// # Examples
///
/// ```
/// use sitecrawl_orchestrator::OrchestratorConfig;
///
/// let config = OrchestratorConfig::default();
/// assert_eq!(config.attempt_limit(), Some(3));
///
/// // Retry failed targets forever
/// let config = OrchestratorConfig { max_attempts: 0, ..config };
/// assert_eq!(config.attempt_limit(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Attempts per target before its failure is final (0 = unbounded)
    pub max_attempts: u32,

    /// Budget for fetching one page (seconds)
    pub fetch_timeout_secs: u64,

    /// Budget for cleaning one page (seconds)
    pub clean_timeout_secs: u64,

    /// Pause between two targets (milliseconds)
    pub request_delay_ms: u64,

    /// Match keywords against URLs ignoring case
    pub case_insensitive: bool,
}

impl Default for OrchestratorConfig {
    /// Balanced settings
    ///
    /// - 3 attempts per target
    /// - 60s fetch, 180s clean
    /// - no delay between targets
    fn default() -> Self {
        Self {
            max_attempts: 3,
            fetch_timeout_secs: 60,
            clean_timeout_secs: 180,
            request_delay_ms: 0,
            case_insensitive: false,
        }
    }
}

impl OrchestratorConfig {
    /// Aggressive preset: fail fast, give up early
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 1,
            fetch_timeout_secs: 15,
            clean_timeout_secs: 60,
            request_delay_ms: 0,
            case_insensitive: false,
        }
    }

    /// Lenient preset: slow sites, slow local models, polite pacing
    pub fn lenient() -> Self {
        Self {
            max_attempts: 5,
            fetch_timeout_secs: 120,
            clean_timeout_secs: 600,
            request_delay_ms: 1_000,
            case_insensitive: true,
        }
    }

    /// Attempt limit as the tracker expects it
    pub fn attempt_limit(&self) -> Option<u32> {
        (self.max_attempts > 0).then_some(self.max_attempts)
    }

    /// Get the fetch budget as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Get the clean budget as Duration
    pub fn clean_timeout(&self) -> Duration {
        Duration::from_secs(self.clean_timeout_secs)
    }

    /// Get the inter-request delay as Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        if self.clean_timeout_secs == 0 {
            return Err("clean_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
