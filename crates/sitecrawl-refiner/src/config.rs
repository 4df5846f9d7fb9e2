//! Configuration for the refiner

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by the keyword generator and the noise cleaner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Root page characters included in the keyword prompt
    pub keyword_input_chars: usize,

    /// Page characters sent to the cleaner
    pub clean_input_chars: usize,

    /// Maximum time for a single LLM call (seconds)
    pub llm_timeout_secs: u64,

    /// Merge URL patterns (e.g. `/docs/`) into the keyword set
    pub include_patterns: bool,
}

impl RefinerConfig {
    /// Get the LLM timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.keyword_input_chars == 0 {
            return Err("keyword_input_chars must be greater than 0".to_string());
        }
        if self.clean_input_chars == 0 {
            return Err("clean_input_chars must be greater than 0".to_string());
        }
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RefinerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            keyword_input_chars: 2_000,
            clean_input_chars: 16_000,
            llm_timeout_secs: 120,
            include_patterns: true,
        }
    }
}

impl RefinerConfig {
    /// Aggressive preset: small prompts and short timeouts
    pub fn aggressive() -> Self {
        Self {
            keyword_input_chars: 1_000,
            clean_input_chars: 4_000,
            llm_timeout_secs: 30,
            include_patterns: true,
        }
    }

    /// Lenient preset: large prompts for slow local models
    pub fn lenient() -> Self {
        Self {
            keyword_input_chars: 8_000,
            clean_input_chars: 64_000,
            llm_timeout_secs: 600,
            include_patterns: true,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RefinerConfig::default().validate().is_ok());
        assert!(RefinerConfig::aggressive().validate().is_ok());
        assert!(RefinerConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_timeout() {
        let config = RefinerConfig {
            llm_timeout_secs: 0,
            ..RefinerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RefinerConfig::lenient();
        let parsed = RefinerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RefinerConfig::from_toml("llm_timeout_secs = 10").unwrap();
        assert_eq!(config.llm_timeout_secs, 10);
        assert_eq!(config.keyword_input_chars, 2_000);
    }
}
