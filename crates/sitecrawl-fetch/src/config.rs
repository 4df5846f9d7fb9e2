//! Configuration for HTTP fetching

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings shared by the sitemap source and the page fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Redirects followed before giving up
    pub max_redirects: usize,

    /// Page text is truncated to this many bytes
    pub max_content_length: usize,

    /// Sitemap location relative to the root URL
    pub sitemap_path: String,

    /// Fall back to root-page links when no sitemap is found
    pub link_fallback: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Sitecrawl/0.1 (+https://github.com/your-org/sitecrawl)".to_string(),
            timeout_secs: 30,
            max_redirects: 5,
            max_content_length: 100_000,
            sitemap_path: "sitemap.xml".to_string(),
            link_fallback: true,
        }
    }
}

impl FetchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_content_length == 0 {
            return Err("max_content_length must be greater than 0".to_string());
        }
        if self.sitemap_path.trim().is_empty() {
            return Err("sitemap_path must not be empty".to_string());
        }
        Ok(())
    }
}
