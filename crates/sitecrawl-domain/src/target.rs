//! Target module - a single URL tracked through a run

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a crawl target
///
/// Transitions:
/// - Pending → Success (terminal)
/// - Pending → Failed
/// - Failed → Success | Failed (on a later retry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    /// Not attempted yet
    Pending,

    /// Fetched, cleaned and written to the artifact
    Success,

    /// Last attempt failed; eligible for retry
    Failed,
}

impl TargetStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetStatus::Pending => "pending",
            TargetStatus::Success => "success",
            TargetStatus::Failed => "failed",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(TargetStatus::Pending),
            "success" => Some(TargetStatus::Success),
            "failed" => Some(TargetStatus::Failed),
            _ => None,
        }
    }

    /// Whether no further transition will ever happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, TargetStatus::Success)
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid target status: {}", s))
    }
}

/// A URL being crawled within a run
///
/// Targets are never deleted; the full list doubles as the audit record of
/// the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTarget {
    /// Unique key within a run
    pub url: String,

    /// Current status
    pub status: TargetStatus,

    /// Error of the last failed attempt
    pub error: Option<String>,

    /// Completed attempts (success or failure)
    #[serde(default)]
    pub attempts: u32,
}

impl CrawlTarget {
    /// Create a new pending target
    ///
    /// # Examples
    ///
    /// ```
    /// use sitecrawl_domain::{CrawlTarget, TargetStatus};
    ///
    /// let target = CrawlTarget::pending("https://a.com/docs");
    /// assert_eq!(target.status, TargetStatus::Pending);
    /// assert!(target.error.is_none());
    /// ```
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: TargetStatus::Pending,
            error: None,
            attempts: 0,
        }
    }

    /// Record a successful attempt
    pub fn succeed(&mut self) {
        self.status = TargetStatus::Success;
        self.error = None;
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Record a failed attempt
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = TargetStatus::Failed;
        self.error = Some(error.into());
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Whether the target still needs work, given an optional attempt limit
    ///
    /// Pending targets are always eligible. Failed targets are eligible until
    /// `max_attempts` attempts have been made.
    pub fn is_eligible(&self, max_attempts: Option<u32>) -> bool {
        match self.status {
            TargetStatus::Pending => true,
            TargetStatus::Success => false,
            TargetStatus::Failed => max_attempts.map_or(true, |max| self.attempts < max),
        }
    }

    /// Failed with no attempts left
    pub fn is_exhausted(&self, max_attempts: Option<u32>) -> bool {
        self.status == TargetStatus::Failed && !self.is_eligible(max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TargetStatus::parse("pending"), Some(TargetStatus::Pending));
        assert_eq!(TargetStatus::parse("SUCCESS"), Some(TargetStatus::Success));
        assert_eq!(TargetStatus::parse("Failed"), Some(TargetStatus::Failed));
        assert_eq!(TargetStatus::parse("in_progress"), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TargetStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
    }

    #[test]
    fn test_fail_then_succeed_clears_error() {
        let mut target = CrawlTarget::pending("a.com/1");
        target.fail("timeout");
        assert_eq!(target.status, TargetStatus::Failed);
        assert_eq!(target.error.as_deref(), Some("timeout"));
        assert_eq!(target.attempts, 1);

        target.succeed();
        assert_eq!(target.status, TargetStatus::Success);
        assert!(target.error.is_none());
        assert_eq!(target.attempts, 2);
        assert!(target.status.is_terminal());
    }

    #[test]
    fn test_eligibility() {
        let mut target = CrawlTarget::pending("a.com/1");
        assert!(target.is_eligible(Some(1)));

        target.fail("boom");
        assert!(!target.is_eligible(Some(1)));
        assert!(target.is_exhausted(Some(1)));
        assert!(target.is_eligible(Some(2)));
        assert!(target.is_eligible(None));

        target.succeed();
        assert!(!target.is_eligible(None));
        assert!(!target.is_exhausted(None));
    }

    #[test]
    fn test_attempts_default_when_missing() {
        let json = r#"{"url": "a.com/1", "status": "pending", "error": null}"#;
        let target: CrawlTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target, CrawlTarget::pending("a.com/1"));
    }
}
