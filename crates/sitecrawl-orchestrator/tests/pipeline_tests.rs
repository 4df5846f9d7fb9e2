//! Integration tests for the driving loop and run planning
//!
//! Collaborators are scripted in-memory; the tracker and the report are the
//! real file-backed implementations.

use sitecrawl_domain::traits::{ContentCleaner, ContentFetcher, KeywordSource, ReportSink, UrlSource};
use sitecrawl_domain::{RunContext, SectionBody, TargetStatus};
use sitecrawl_orchestrator::{Orchestrator, OrchestratorConfig, OrchestratorError};
use sitecrawl_store::{InitMode, MarkdownReport, ProgressTracker, TrackerError};
use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// Mock collaborators

struct StaticUrls(Vec<String>);

impl UrlSource for StaticUrls {
    type Error = String;

    async fn candidate_urls(&self, _root_url: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self.0.clone())
    }
}

struct StaticKeywords(Vec<String>);

impl KeywordSource for StaticKeywords {
    type Error = String;

    async fn keywords(&self, _root_url: &str, _root_content: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self.0.clone())
    }
}

#[derive(Clone, Default)]
struct ScriptedFetcher {
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    slow: Arc<Mutex<HashSet<String>>>,
}

impl ScriptedFetcher {
    fn fail(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    fn recover(&self, url: &str) {
        self.failing.lock().unwrap().remove(url);
    }

    fn hang(&self, url: &str) {
        self.slow.lock().unwrap().insert(url.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentFetcher for ScriptedFetcher {
    type Error = String;

    async fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        let slow = self.slow.lock().unwrap().contains(url);
        if slow {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if self.failing.lock().unwrap().contains(url) {
            return Err("HTTP 500".to_string());
        }
        Ok(format!("page {}", url))
    }
}

#[derive(Clone, Default)]
struct ScriptedCleaner {
    calls: Arc<Mutex<usize>>,
    fail_on: Option<String>,
}

impl ContentCleaner for ScriptedCleaner {
    type Error = String;

    async fn clean(&self, markdown: &str) -> Result<String, Self::Error> {
        *self.calls.lock().unwrap() += 1;
        if let Some(fragment) = &self.fail_on {
            if markdown.contains(fragment.as_str()) {
                return Err("LLM error: model not loaded".to_string());
            }
        }
        Ok(format!("clean {}", markdown))
    }
}

/// Report sink that refuses to write one URL
struct FlakySink {
    inner: MarkdownReport,
    fail_on: String,
}

impl ReportSink for FlakySink {
    type Error = String;

    fn append_section(&mut self, url: &str, body: &SectionBody) -> Result<(), Self::Error> {
        if url == self.fail_on {
            return Err("disk full".to_string());
        }
        self.inner
            .append_section(url, body)
            .map_err(|e| e.to_string())
    }
}

// Helpers

type TestOrchestrator = Orchestrator<StaticUrls, StaticKeywords, ScriptedFetcher, ScriptedCleaner>;

fn orchestrator(fetcher: &ScriptedFetcher, cleaner: &ScriptedCleaner, config: OrchestratorConfig) -> TestOrchestrator {
    Orchestrator::new(
        StaticUrls(vec![
            "a.com/docs/1".to_string(),
            "a.com/blog/x".to_string(),
            "a.com/api/2".to_string(),
        ]),
        StaticKeywords(vec!["docs".to_string(), "api".to_string()]),
        fetcher.clone(),
        cleaner.clone(),
        config,
    )
    .unwrap()
}

fn context(dir: &TempDir) -> RunContext {
    RunContext::new("a.com", dir.path().join("state"), dir.path().join("out"))
}

fn three_targets(ctx: &RunContext) -> ProgressTracker {
    ProgressTracker::initialize(ctx, ["a.com/1", "a.com/2", "a.com/3"], InitMode::Fresh).unwrap()
}

fn statuses(tracker: &ProgressTracker) -> Vec<TargetStatus> {
    tracker.targets().iter().map(|t| t.status).collect()
}

fn headings(report: &str) -> Vec<&str> {
    report.lines().filter(|l| l.starts_with("# ")).collect()
}

// Driving loop

#[tokio::test]
async fn test_full_drain_leaves_nothing_pending() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();
    assert_eq!(pass.attempted, 3);

    let persisted = ProgressTracker::load(&ctx).unwrap();
    assert!(persisted
        .targets()
        .iter()
        .all(|t| t.status != TargetStatus::Pending));
}

#[tokio::test]
async fn test_fetch_timeout_is_recorded_and_loop_continues() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.hang("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let config = OrchestratorConfig {
        fetch_timeout_secs: 1,
        ..OrchestratorConfig::default()
    };
    let orchestrator = orchestrator(&fetcher, &cleaner, config);

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    assert_eq!(pass.succeeded, 2);
    assert_eq!(pass.failed(), 1);

    let persisted = ProgressTracker::load(&ctx).unwrap();
    assert_eq!(
        statuses(&persisted),
        vec![TargetStatus::Success, TargetStatus::Failed, TargetStatus::Success]
    );
    assert_eq!(
        persisted.get("a.com/2").unwrap().error.as_deref(),
        Some("fetch timed out after 1s")
    );

    let report = fs::read_to_string(&ctx.report_path).unwrap();
    assert_eq!(headings(&report), vec!["# a.com/1", "# a.com/2", "# a.com/3"]);
    assert!(report.contains("# a.com/2\n\n[ERROR] fetch timed out after 1s\n\n"));
    assert!(report.contains("# a.com/3\n\nclean page a.com/3\n\n"));
}

#[tokio::test]
async fn test_clean_failure_is_recorded() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner {
        fail_on: Some("a.com/3".to_string()),
        ..ScriptedCleaner::default()
    };
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    let target = tracker.get("a.com/3").unwrap();
    assert_eq!(target.status, TargetStatus::Failed);
    assert_eq!(
        target.error.as_deref(),
        Some("Clean failed: LLM error: model not loaded")
    );
    let report = fs::read_to_string(&ctx.report_path).unwrap();
    assert!(report.ends_with("# a.com/3\n\n[ERROR] Clean failed: LLM error: model not loaded\n\n"));
}

#[tokio::test]
async fn test_second_run_after_success_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();
    let report_before = fs::read_to_string(&ctx.report_path).unwrap();
    let fetches_before = fetcher.calls().len();
    let cleans_before = *cleaner.calls.lock().unwrap();

    let mut tracker = ProgressTracker::load(&ctx).unwrap();
    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    assert_eq!(pass.attempted, 0);
    assert_eq!(fetcher.calls().len(), fetches_before);
    assert_eq!(*cleaner.calls.lock().unwrap(), cleans_before);
    assert_eq!(fs::read_to_string(&ctx.report_path).unwrap(), report_before);
}

#[tokio::test]
async fn test_resume_after_crash_processes_only_remaining() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    fs::create_dir_all(ctx.state_path.parent().unwrap()).unwrap();
    fs::write(
        &ctx.state_path,
        r#"[
            {"url": "a.com/1", "status": "success", "error": null},
            {"url": "a.com/2", "status": "pending", "error": null},
            {"url": "a.com/3", "status": "pending", "error": null}
        ]"#,
    )
    .unwrap();
    let mut sink = MarkdownReport::new(&ctx.report_path);
    sink.append_section("a.com/1", &SectionBody::Content("clean page a.com/1".into()))
        .unwrap();

    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = ProgressTracker::load(&ctx).unwrap();
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    assert_eq!(fetcher.calls(), vec!["a.com/2", "a.com/3"]);
    let persisted = ProgressTracker::load(&ctx).unwrap();
    assert!(persisted
        .targets()
        .iter()
        .all(|t| t.status == TargetStatus::Success));

    let report = fs::read_to_string(&ctx.report_path).unwrap();
    assert_eq!(headings(&report), vec!["# a.com/1", "# a.com/2", "# a.com/3"]);
}

#[tokio::test]
async fn test_write_failure_marks_only_that_target() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = three_targets(&ctx);
    let mut sink = FlakySink {
        inner: MarkdownReport::new(&ctx.report_path),
        fail_on: "a.com/2".to_string(),
    };
    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();
    assert_eq!(pass.failures[0].url, "a.com/2");

    let persisted = ProgressTracker::load(&ctx).unwrap();
    assert_eq!(
        statuses(&persisted),
        vec![TargetStatus::Success, TargetStatus::Failed, TargetStatus::Success]
    );
    assert_eq!(
        persisted.get("a.com/2").unwrap().error.as_deref(),
        Some("Write failed: disk full")
    );

    let report = fs::read_to_string(&ctx.report_path).unwrap();
    assert_eq!(headings(&report), vec!["# a.com/1", "# a.com/3"]);
}

#[tokio::test]
async fn test_failed_target_is_not_retried_within_a_pass() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let config = OrchestratorConfig {
        max_attempts: 0,
        ..OrchestratorConfig::default()
    };
    let orchestrator = orchestrator(&fetcher, &cleaner, config);

    let mut tracker = three_targets(&ctx).with_max_attempts(None);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    assert_eq!(fetcher.calls(), vec!["a.com/1", "a.com/2", "a.com/3"]);
    assert_eq!(tracker.get("a.com/2").unwrap().attempts, 1);
}

#[tokio::test]
async fn test_failed_target_retried_in_later_invocation() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    fetcher.recover("a.com/2");
    let mut tracker = ProgressTracker::load(&ctx).unwrap();
    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    assert_eq!(pass.attempted, 1);
    assert_eq!(
        fetcher.calls(),
        vec!["a.com/1", "a.com/2", "a.com/3", "a.com/2"]
    );
    let target = tracker.get("a.com/2").unwrap();
    assert_eq!(target.status, TargetStatus::Success);
    assert!(target.error.is_none());
    assert_eq!(target.attempts, 2);

    // The error section of the first attempt stays; the retry appends
    let report = fs::read_to_string(&ctx.report_path).unwrap();
    assert_eq!(
        headings(&report),
        vec!["# a.com/1", "# a.com/2", "# a.com/3", "# a.com/2"]
    );
}

#[tokio::test]
async fn test_exhausted_targets_are_skipped() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let config = OrchestratorConfig {
        max_attempts: 1,
        ..OrchestratorConfig::default()
    };
    let orchestrator = orchestrator(&fetcher, &cleaner, config);

    let mut tracker = three_targets(&ctx);
    let mut sink = MarkdownReport::new(&ctx.report_path);
    orchestrator.drain(&mut tracker, &mut sink).await.unwrap();

    let pass = orchestrator.drain(&mut tracker, &mut sink).await.unwrap();
    assert_eq!(pass.attempted, 0);
    assert_eq!(pass.exhausted, 1);
    assert_eq!(fetcher.calls().len(), 3);
    assert_eq!(tracker.get("a.com/2").unwrap().status, TargetStatus::Failed);
}

#[tokio::test]
async fn test_attempt_limit_applies_to_loaded_state() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com/2");
    let cleaner = ScriptedCleaner::default();
    let config = OrchestratorConfig {
        max_attempts: 1,
        ..OrchestratorConfig::default()
    };
    let orchestrator = orchestrator(&fetcher, &cleaner, config);
    three_targets(&ctx);

    let mut sink = MarkdownReport::new(&ctx.report_path);
    for _ in 0..3 {
        let mut tracker = ProgressTracker::load(&ctx).unwrap();
        orchestrator.drain(&mut tracker, &mut sink).await.unwrap();
    }

    let tracker = ProgressTracker::load(&ctx).unwrap();
    assert_eq!(tracker.get("a.com/2").unwrap().attempts, 1);
    let calls_for_2 = fetcher.calls().iter().filter(|u| *u == "a.com/2").count();
    assert_eq!(calls_for_2, 1);
}

// Planning

#[tokio::test]
async fn test_plan_classifies_candidates() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let tracker = orchestrator.plan(&ctx, InitMode::Fresh).await.unwrap();

    let urls: Vec<_> = tracker.targets().iter().map(|t| t.url.as_str()).collect();
    assert_eq!(urls, vec!["a.com/docs/1", "a.com/api/2"]);
    // Root page fetched once for keyword generation
    assert_eq!(fetcher.calls(), vec!["a.com"]);
    assert!(ctx.state_path.exists());
}

#[tokio::test]
async fn test_discover_reports_all_stages() {
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let discovery = orchestrator.discover("a.com").await.unwrap();
    assert_eq!(discovery.candidates.len(), 3);
    assert_eq!(discovery.keywords, vec!["docs", "api"]);
    assert_eq!(discovery.targets, vec!["a.com/docs/1", "a.com/api/2"]);
}

#[tokio::test]
async fn test_plan_fresh_refuses_existing_run() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    three_targets(&ctx);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let result = orchestrator.plan(&ctx, InitMode::Fresh).await;
    assert!(matches!(
        result,
        Err(OrchestratorError::Tracker(TrackerError::AlreadyExists(_)))
    ));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_plan_resume_skips_discovery() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    three_targets(&ctx);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let tracker = orchestrator.plan(&ctx, InitMode::Resume).await.unwrap();
    assert_eq!(tracker.targets().len(), 3);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_plan_fails_when_root_page_fails() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    fetcher.fail("a.com");
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let result = orchestrator.plan(&ctx, InitMode::Fresh).await;
    assert!(matches!(result, Err(OrchestratorError::Planning(_))));
    assert!(!ctx.state_path.exists());
}

#[tokio::test]
async fn test_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let orchestrator = orchestrator(&fetcher, &cleaner, OrchestratorConfig::default());

    let report = orchestrator.run(&ctx, InitMode::Resume).await.unwrap();
    assert_eq!(report.run_id, ctx.run_id.to_string());
    assert_eq!(report.pass.succeeded, 2);
    assert!(report.progress.is_complete());

    let text = fs::read_to_string(&ctx.report_path).unwrap();
    assert_eq!(
        text,
        "# a.com/docs/1\n\nclean page a.com/docs/1\n\n# a.com/api/2\n\nclean page a.com/api/2\n\n"
    );

    // Running again changes nothing
    let again = orchestrator.run(&ctx, InitMode::Resume).await.unwrap();
    assert_eq!(again.pass.attempted, 0);
    assert_eq!(fs::read_to_string(&ctx.report_path).unwrap(), text);
}

#[test]
fn test_invalid_config_rejected() {
    let fetcher = ScriptedFetcher::default();
    let cleaner = ScriptedCleaner::default();
    let result = Orchestrator::new(
        StaticUrls(Vec::new()),
        StaticKeywords(Vec::new()),
        fetcher,
        cleaner,
        OrchestratorConfig {
            fetch_timeout_secs: 0,
            ..OrchestratorConfig::default()
        },
    );
    assert!(matches!(result, Err(OrchestratorError::Config(_))));
}
