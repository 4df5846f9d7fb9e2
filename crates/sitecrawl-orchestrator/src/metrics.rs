//! Metrics collected during one drain pass

use crate::error::AttemptError;
use serde::Serialize;

/// A URL that failed during the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    /// Target URL
    pub url: String,

    /// Recorded error
    pub error: String,
}

/// Outcome of one [`drain`](crate::Orchestrator::drain) call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Targets attempted in this pass
    pub attempted: usize,

    /// Targets written to the report
    pub succeeded: usize,

    /// Failures in attempt order
    pub failures: Vec<FailedAttempt>,

    /// Failed targets skipped because their attempts are used up
    pub exhausted: usize,

    /// Wall-clock duration of the pass in milliseconds
    pub elapsed_ms: u64,
}

impl PassReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written target
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Record a failed target
    pub fn record_failure(&mut self, url: &str, error: &AttemptError) {
        self.attempted += 1;
        self.failures.push(FailedAttempt {
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    /// Number of failed targets
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Crawl Pass Summary".to_string(),
            "==================".to_string(),
            format!("Attempted: {}", self.attempted),
            format!("Succeeded: {}", self.succeeded),
            format!("Failed: {}", self.failed()),
            format!("Exhausted (skipped): {}", self.exhausted),
            format!("Elapsed: {}ms", self.elapsed_ms),
        ];

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failures:".to_string());
            for failure in &self.failures {
                lines.push(format!("  {}: {}", failure.url, failure.error));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_creation() {
        let report = PassReport::new();
        assert_eq!(report.attempted, 0);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut report = PassReport::new();
        report.record_success();
        report.record_failure("a.com/2", &AttemptError::Fetch("HTTP 404".into()));
        report.record_success();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].error, "Fetch failed: HTTP 404");
    }

    #[test]
    fn test_summary() {
        let mut report = PassReport::new();
        report.record_failure(
            "a.com/2",
            &AttemptError::Timeout {
                stage: "clean",
                secs: 5,
            },
        );
        report.exhausted = 1;
        report.elapsed_ms = 42;

        let summary = report.summary();
        assert!(summary.contains("Attempted: 1"));
        assert!(summary.contains("Exhausted (skipped): 1"));
        assert!(summary.contains("Elapsed: 42ms"));
        assert!(summary.contains("a.com/2: clean timed out after 5s"));
    }
}
