//! Error types for fetching

use thiserror::Error;

/// Errors that can occur while discovering or fetching pages
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL could not be parsed or is not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status {
        /// Response status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Request exceeded the configured timeout
    #[error("Timed out fetching {0}")]
    Timeout(String),

    /// Sitemap could not be parsed
    #[error("Sitemap error: {0}")]
    Sitemap(String),

    /// Page body was empty after extraction
    #[error("No content at {0}")]
    Empty(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.url() {
            Some(url) if e.is_timeout() => FetchError::Timeout(url.to_string()),
            _ => FetchError::Http(e.to_string()),
        }
    }
}

impl From<quick_xml::Error> for FetchError {
    fn from(e: quick_xml::Error) -> Self {
        FetchError::Sitemap(e.to_string())
    }
}
