//! Error types for orchestrator operations

use sitecrawl_store::TrackerError;
use thiserror::Error;

/// Fatal errors: the run cannot continue
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Progress could not be read or persisted
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// URL discovery, root page fetch or keyword generation failed
    #[error("Planning failed: {0}")]
    Planning(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a single URL could not be processed
///
/// Recorded on the target and in the report, never escalated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Fetching the page failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Cleaning the page failed
    #[error("Clean failed: {0}")]
    Clean(String),

    /// Appending the section to the report failed
    #[error("Write failed: {0}")]
    Write(String),

    /// A stage exceeded its time budget
    #[error("{stage} timed out after {secs}s")]
    Timeout {
        /// Stage that timed out (`fetch` or `clean`)
        stage: &'static str,
        /// Configured budget
        secs: u64,
    },
}
