//! Crawl progress tracker backed by a JSON state file

use crate::TrackerError;
use serde::Serialize;
use sitecrawl_domain::{CrawlTarget, RunContext, TargetStatus};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Attempts allowed per target before a failure becomes permanent
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How [`ProgressTracker::initialize`] treats existing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Start a new run; existing state is an error
    Fresh,

    /// Continue existing state if there is any, otherwise start fresh
    Resume,
}

/// Counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    /// All targets
    pub total: usize,
    /// Not attempted yet
    pub pending: usize,
    /// Written to the artifact
    pub success: usize,
    /// Last attempt failed (exhausted ones included)
    pub failed: usize,
    /// Failed with no attempts left
    pub exhausted: usize,
}

impl ProgressSummary {
    /// Targets a future drain would still attempt
    pub fn remaining(&self) -> usize {
        self.pending + self.failed - self.exhausted
    }

    /// Whether nothing is left to attempt
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}

/// Owns the target list of a run and persists it after every mutation
///
/// Targets keep insertion order, which is also processing order. A target
/// is never removed: the state file doubles as the audit record of the run.
///
/// # Examples
///
/// ```no_run
/// use sitecrawl_domain::RunContext;
/// use sitecrawl_store::{InitMode, ProgressTracker};
///
/// let ctx = RunContext::new("https://a.com", "state", "out");
/// let mut tracker = ProgressTracker::initialize(
///     &ctx,
///     vec!["https://a.com/1".to_string(), "https://a.com/2".to_string()],
///     InitMode::Fresh,
/// ).unwrap();
///
/// while let Some(url) = tracker.next_pending().map(|t| t.url.clone()) {
///     tracker.mark_success(&url).unwrap();
/// }
/// assert!(tracker.summary().is_complete());
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    path: PathBuf,
    targets: Vec<CrawlTarget>,
    max_attempts: Option<u32>,
}

impl ProgressTracker {
    /// Create (or, in [`InitMode::Resume`], reopen) the progress of a run
    ///
    /// A fresh run holds one Pending target per url. Duplicate urls are
    /// dropped, first occurrence wins. The new state is persisted before
    /// this returns.
    pub fn initialize<I, S>(ctx: &RunContext, urls: I, mode: InitMode) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = ctx.state_path.clone();

        if path.exists() {
            match mode {
                InitMode::Fresh => return Err(TrackerError::AlreadyExists(display(&path))),
                InitMode::Resume => {
                    info!("Resuming run {} from {}", ctx.run_id, path.display());
                    return Self::load(ctx);
                }
            }
        }

        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for url in urls {
            let url = url.into();
            if seen.insert(url.clone()) {
                targets.push(CrawlTarget::pending(url));
            } else {
                debug!("Dropping duplicate target {}", url);
            }
        }

        let tracker = Self {
            path,
            targets,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        };
        tracker.persist()?;

        info!(
            "Initialized run {} with {} targets",
            ctx.run_id,
            tracker.targets.len()
        );
        Ok(tracker)
    }

    /// Load the persisted progress of a run
    ///
    /// Fails with [`TrackerError::NotFound`] when there is no state file and
    /// with [`TrackerError::Corrupt`] when its content cannot be trusted
    /// (malformed JSON, unknown status, duplicate urls).
    pub fn load(ctx: &RunContext) -> Result<Self, TrackerError> {
        let path = ctx.state_path.clone();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TrackerError::NotFound(display(&path)))
            }
            Err(e) => return Err(TrackerError::Io(e)),
        };

        let targets: Vec<CrawlTarget> =
            serde_json::from_str(&raw).map_err(|e| TrackerError::Corrupt {
                path: display(&path),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        if let Some(dup) = targets.iter().find(|t| !seen.insert(t.url.as_str())) {
            return Err(TrackerError::Corrupt {
                path: display(&path),
                reason: format!("duplicate target {}", dup.url),
            });
        }

        debug!("Loaded {} targets from {}", targets.len(), path.display());
        Ok(Self {
            path,
            targets,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        })
    }

    /// Set the attempt limit for failed targets (`None` = retry forever)
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Replace the attempt limit in place
    pub fn set_max_attempts(&mut self, max_attempts: Option<u32>) {
        self.max_attempts = max_attempts;
    }

    /// Current attempt limit
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Location of the state file
    pub fn state_path(&self) -> &Path {
        &self.path
    }

    /// All targets in insertion order
    pub fn targets(&self) -> &[CrawlTarget] {
        &self.targets
    }

    /// Look up a target by url
    pub fn get(&self, url: &str) -> Option<&CrawlTarget> {
        self.targets.iter().find(|t| t.url == url)
    }

    /// First target still needing work: Pending, or Failed with attempts left
    pub fn next_pending(&self) -> Option<&CrawlTarget> {
        self.targets
            .iter()
            .find(|t| t.is_eligible(self.max_attempts))
    }

    /// Like [`next_pending`](Self::next_pending), skipping urls in `visited`
    pub fn next_pending_excluding(&self, visited: &HashSet<String>) -> Option<&CrawlTarget> {
        self.targets
            .iter()
            .find(|t| t.is_eligible(self.max_attempts) && !visited.contains(&t.url))
    }

    /// Mark a target as written to the artifact and persist
    ///
    /// Fails with [`TrackerError::InvalidTransition`] if the target already
    /// succeeded.
    pub fn mark_success(&mut self, url: &str) -> Result<(), TrackerError> {
        self.target_mut(url)?.succeed();
        self.persist()?;
        debug!("Marked {} as success", url);
        Ok(())
    }

    /// Mark a target as failed with `error` and persist
    ///
    /// Fails with [`TrackerError::InvalidTransition`] if the target already
    /// succeeded.
    pub fn mark_failed(&mut self, url: &str, error: &str) -> Result<(), TrackerError> {
        let max_attempts = self.max_attempts;
        let target = self.target_mut(url)?;
        target.fail(error);
        if target.is_exhausted(max_attempts) {
            warn!(
                "Giving up on {} after {} attempts: {}",
                url, target.attempts, error
            );
        }
        self.persist()?;
        debug!("Marked {} as failed", url);
        Ok(())
    }

    /// Counts per status
    pub fn summary(&self) -> ProgressSummary {
        let mut summary = ProgressSummary {
            total: self.targets.len(),
            ..ProgressSummary::default()
        };
        for target in &self.targets {
            match target.status {
                TargetStatus::Pending => summary.pending += 1,
                TargetStatus::Success => summary.success += 1,
                TargetStatus::Failed => {
                    summary.failed += 1;
                    if target.is_exhausted(self.max_attempts) {
                        summary.exhausted += 1;
                    }
                }
            }
        }
        summary
    }

    /// Target that may still change status
    fn target_mut(&mut self, url: &str) -> Result<&mut CrawlTarget, TrackerError> {
        let target = self
            .targets
            .iter_mut()
            .find(|t| t.url == url)
            .ok_or_else(|| TrackerError::UnknownTarget(url.to_string()))?;

        if target.status.is_terminal() {
            return Err(TrackerError::InvalidTransition {
                url: url.to_string(),
                status: target.status,
            });
        }
        Ok(target)
    }

    /// Write the full target list to `<file>.tmp`, then rename over the file
    fn persist(&self) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.targets)
            .map_err(|e| TrackerError::Io(std::io::Error::other(e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
