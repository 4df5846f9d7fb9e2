//! Run module - identity and file layout of a crawl run

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of hex characters kept from the root URL digest
const RUN_ID_LEN: usize = 16;

/// Identifier of a crawl run, derived from its root URL
///
/// The same root URL always maps to the same id, which is what lets a later
/// invocation find and resume an interrupted run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Derive the run id of a root URL
    ///
    /// Trailing slashes and surrounding whitespace are ignored, so
    /// `https://a.com` and `https://a.com/` share a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitecrawl_domain::RunId;
    ///
    /// let a = RunId::from_root_url("https://a.com/");
    /// let b = RunId::from_root_url("https://a.com");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 16);
    /// ```
    pub fn from_root_url(root_url: &str) -> Self {
        let normalized = normalize_root(root_url);
        let digest = Sha256::digest(normalized.as_bytes());
        let mut id = hex::encode(digest);
        id.truncate(RUN_ID_LEN);
        Self(id)
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize_root(root_url: &str) -> &str {
    root_url.trim().trim_end_matches('/')
}

/// Explicit context of one run
///
/// Passed to the tracker, the report writer and the orchestrator instead of
/// any process-wide "current run", so several runs can live in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Root URL the run was started from
    pub root_url: String,

    /// Identifier derived from `root_url`
    pub run_id: RunId,

    /// Persisted target list (`<state_dir>/<run_id>.json`)
    pub state_path: PathBuf,

    /// Markdown artifact (`<output_dir>/<run_id>.md`)
    pub report_path: PathBuf,
}

impl RunContext {
    /// Build the context of a run rooted at `root_url`
    pub fn new(
        root_url: impl Into<String>,
        state_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        let root_url = root_url.into();
        let run_id = RunId::from_root_url(&root_url);
        let state_path = state_dir.as_ref().join(format!("{}.json", run_id));
        let report_path = output_dir.as_ref().join(format!("{}.md", run_id));

        Self {
            root_url,
            run_id,
            state_path,
            report_path,
        }
    }

    /// Override the artifact location
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }
}
