//! Sitecrawl Storage Layer
//!
//! Durable state of a crawl run, kept in two files named after the run id:
//!
//! # Architecture
//!
//! - [`ProgressTracker`]: the target list and per-URL status, as a JSON array
//!   rewritten (tmp file + rename) after every status transition
//! - [`MarkdownReport`]: the append-only Markdown artifact, opened, written,
//!   flushed and closed for every section
//!
//! Both are single writers of their file. Interrupting the process at any
//! point leaves a state file that reflects the last completed transition.
//!
//! # Examples
//!
//! ```no_run
//! use sitecrawl_domain::RunContext;
//! use sitecrawl_store::{InitMode, ProgressTracker};
//!
//! let ctx = RunContext::new("https://a.com", "state", "out");
//! let urls = vec!["https://a.com/docs/1".to_string()];
//! let tracker = ProgressTracker::initialize(&ctx, urls, InitMode::Resume).unwrap();
//! assert_eq!(tracker.summary().total, 1);
//! ```

#![warn(missing_docs)]

mod report;
mod tracker;

use sitecrawl_domain::TargetStatus;
use thiserror::Error;

pub use report::MarkdownReport;
pub use tracker::{InitMode, ProgressSummary, ProgressTracker, DEFAULT_MAX_ATTEMPTS};

/// Errors that can occur while reading or writing crawl progress
#[derive(Error, Debug)]
pub enum TrackerError {
    /// No state file exists for the run
    #[error("No saved progress at {0}")]
    NotFound(String),

    /// State file exists but cannot be trusted
    #[error("Corrupt progress file {path}: {reason}")]
    Corrupt {
        /// Offending file
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// A fresh run was requested but progress already exists
    #[error("Progress already exists at {0}; resume instead")]
    AlreadyExists(String),

    /// URL is not part of the run
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// Status change not allowed from the target's current status
    #[error("Target {url} is already {status}; it cannot change again")]
    InvalidTransition {
        /// Target URL
        url: String,
        /// Current status
        status: TargetStatus,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while appending to the Markdown artifact
#[derive(Error, Debug)]
pub enum ReportError {
    /// Filesystem error
    #[error("Report write failed: {0}")]
    Io(#[from] std::io::Error),
}
