//! Run planning and the per-URL driving loop

use crate::{AttemptError, OrchestratorConfig, OrchestratorError, PassReport};
use serde::Serialize;
use sitecrawl_domain::traits::{ContentCleaner, ContentFetcher, KeywordSource, ReportSink, UrlSource};
use sitecrawl_domain::{Classifier, RunContext, SectionBody};
use sitecrawl_store::{InitMode, MarkdownReport, ProgressSummary, ProgressTracker, TrackerError};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::Instant;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

/// Result of URL discovery and classification for a root URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Candidate URLs in discovery order
    pub candidates: Vec<String>,

    /// Keywords used for classification
    pub keywords: Vec<String>,

    /// Candidates labelled HIGH, in discovery order
    pub targets: Vec<String>,
}

/// Outcome of [`Orchestrator::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Run identifier
    pub run_id: String,

    /// The drain pass of this invocation
    pub pass: PassReport,

    /// Progress after the pass
    pub progress: ProgressSummary,
}

/// Drives a crawl run: plan once, then drain pending targets
///
/// Collaborators are generic so every stage can be swapped (and mocked):
/// URL discovery `U`, keyword generation `K`, page fetching `F` and
/// cleaning `C`.
///
/// # Examples
///
/// ```no_run
/// use sitecrawl_domain::RunContext;
/// use sitecrawl_orchestrator::{Orchestrator, OrchestratorConfig};
/// # use sitecrawl_domain::traits::{ContentCleaner, ContentFetcher, KeywordSource, UrlSource};
/// # async fn example<U, K, F, C>(urls: U, keywords: K, fetcher: F, cleaner: C) -> Result<(), Box<dyn std::error::Error>>
/// # where
/// #     U: UrlSource + Sync, U::Error: std::fmt::Display,
/// #     K: KeywordSource + Sync, K::Error: std::fmt::Display,
/// #     F: ContentFetcher + Sync, F::Error: std::fmt::Display,
/// #     C: ContentCleaner + Sync, C::Error: std::fmt::Display,
/// # {
/// let orchestrator = Orchestrator::new(urls, keywords, fetcher, cleaner, OrchestratorConfig::default())?;
/// let ctx = RunContext::new("https://fast-agent.ai/", "state", "output");
///
/// let report = orchestrator.run(&ctx, sitecrawl_store::InitMode::Resume).await?;
/// println!("{}", report.pass.summary());
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator<U, K, F, C> {
    urls: U,
    keywords: K,
    fetcher: F,
    cleaner: C,
    config: OrchestratorConfig,
}

impl<U, K, F, C> Orchestrator<U, K, F, C>
where
    U: UrlSource,
    U::Error: Display,
    K: KeywordSource,
    K::Error: Display,
    F: ContentFetcher,
    F::Error: Display,
    C: ContentCleaner,
    C::Error: Display,
{
    /// Create a new orchestrator
    pub fn new(
        urls: U,
        keywords: K,
        fetcher: F,
        cleaner: C,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestratorError> {
        config.validate().map_err(OrchestratorError::Config)?;
        Ok(Self {
            urls,
            keywords,
            fetcher,
            cleaner,
            config,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Find candidate URLs, derive keywords from the root page and classify
    ///
    /// Makes no changes on disk.
    pub async fn discover(&self, root_url: &str) -> Result<Discovery, OrchestratorError> {
        let candidates = self
            .urls
            .candidate_urls(root_url)
            .await
            .map_err(|e| OrchestratorError::Planning(format!("URL discovery failed: {}", e)))?;
        info!("Found {} candidate URLs for {}", candidates.len(), root_url);

        let root_content = timeout(self.config.fetch_timeout(), self.fetcher.fetch(root_url))
            .await
            .map_err(|_| {
                OrchestratorError::Planning(format!(
                    "Root page fetch timed out after {}s",
                    self.config.fetch_timeout_secs
                ))
            })?
            .map_err(|e| OrchestratorError::Planning(format!("Root page fetch failed: {}", e)))?;

        let keywords = self
            .keywords
            .keywords(root_url, &root_content)
            .await
            .map_err(|e| OrchestratorError::Planning(format!("Keyword generation failed: {}", e)))?;

        let classifier = Classifier::new(keywords).case_insensitive(self.config.case_insensitive);
        let targets = classifier.partition(&candidates);
        info!(
            "Classified {} of {} URLs as HIGH using {} keywords",
            targets.len(),
            candidates.len(),
            classifier.keywords().len()
        );

        Ok(Discovery {
            candidates,
            keywords: classifier.keywords().to_vec(),
            targets,
        })
    }

    /// Prepare the progress tracker of a run
    ///
    /// In [`InitMode::Resume`] with existing state, the state is loaded and
    /// no discovery happens. Otherwise the HIGH URLs of [`discover`] become
    /// the targets. [`InitMode::Fresh`] with existing state fails before any
    /// network call.
    ///
    /// [`discover`]: Self::discover
    pub async fn plan(&self, ctx: &RunContext, mode: InitMode) -> Result<ProgressTracker, OrchestratorError> {
        if ctx.state_path.exists() {
            if mode == InitMode::Fresh {
                return Err(TrackerError::AlreadyExists(ctx.state_path.display().to_string()).into());
            }
            let tracker = ProgressTracker::load(ctx)?.with_max_attempts(self.config.attempt_limit());
            info!(
                "Resuming run {}: {} targets, {} remaining",
                ctx.run_id,
                tracker.targets().len(),
                tracker.summary().remaining()
            );
            return Ok(tracker);
        }

        let discovery = self.discover(&ctx.root_url).await?;
        if discovery.targets.is_empty() {
            warn!("No HIGH URLs for {}; the run has nothing to crawl", ctx.root_url);
        }

        let tracker = ProgressTracker::initialize(ctx, discovery.targets, mode)?
            .with_max_attempts(self.config.attempt_limit());
        Ok(tracker)
    }

    /// Process every eligible target once
    ///
    /// Targets are taken in insertion order. Each is fetched, cleaned and
    /// appended to `sink`, then marked success; any per-URL failure is
    /// recorded on the target (and, for fetch/clean failures, as an error
    /// section) and the loop moves on. A failed target is not retried within
    /// the same pass; a later call picks it up again until its attempts are
    /// used up.
    ///
    /// The configured attempt limit replaces whatever limit `tracker` carried.
    ///
    /// Only tracker persistence failures abort the pass.
    pub async fn drain<R>(&self, tracker: &mut ProgressTracker, sink: &mut R) -> Result<PassReport, OrchestratorError>
    where
        R: ReportSink,
        R::Error: Display,
    {
        let start = Instant::now();
        let mut report = PassReport::new();
        let mut visited = HashSet::new();

        tracker.set_max_attempts(self.config.attempt_limit());
        report.exhausted = tracker.summary().exhausted;
        if report.exhausted > 0 {
            info!("Skipping {} targets with no attempts left", report.exhausted);
        }

        while let Some(target) = tracker.next_pending_excluding(&visited) {
            let url = target.url.clone();
            let attempt = target.attempts + 1;
            visited.insert(url.clone());

            if report.attempted > 0 && !self.config.request_delay().is_zero() {
                sleep(self.config.request_delay()).await;
            }

            info!("Processing {} (attempt {})", url, attempt);
            let outcome = match self.process(&url).await {
                Ok(cleaned) => sink
                    .append_section(&url, &SectionBody::Content(cleaned))
                    .map_err(|e| AttemptError::Write(e.to_string())),
                Err(err) => {
                    if let Err(e) = sink.append_section(&url, &SectionBody::Error(err.to_string())) {
                        warn!("Could not record error section for {}: {}", url, e);
                    }
                    Err(err)
                }
            };

            match outcome {
                Ok(()) => {
                    tracker.mark_success(&url)?;
                    report.record_success();
                    debug!("Completed {}", url);
                }
                Err(err) => {
                    warn!("Failed {}: {}", url, err);
                    tracker.mark_failed(&url, &err.to_string())?;
                    report.record_failure(&url, &err);
                }
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Pass completed: {} attempted, {} succeeded, {} failed",
            report.attempted,
            report.succeeded,
            report.failed()
        );
        Ok(report)
    }

    /// Plan (or resume) a run and drain it once into its Markdown report
    pub async fn run(&self, ctx: &RunContext, mode: InitMode) -> Result<RunReport, OrchestratorError> {
        let mut tracker = self.plan(ctx, mode).await?;
        let mut sink = MarkdownReport::new(&ctx.report_path);

        let pass = self.drain(&mut tracker, &mut sink).await?;
        info!("Report for run {}: {}", ctx.run_id, ctx.report_path.display());

        Ok(RunReport {
            run_id: ctx.run_id.to_string(),
            pass,
            progress: tracker.summary(),
        })
    }

    /// Fetch then clean one URL, each within its time budget
    async fn process(&self, url: &str) -> Result<String, AttemptError> {
        let markdown = timeout(self.config.fetch_timeout(), self.fetcher.fetch(url))
            .await
            .map_err(|_| AttemptError::Timeout {
                stage: "fetch",
                secs: self.config.fetch_timeout_secs,
            })?
            .map_err(|e| AttemptError::Fetch(e.to_string()))?;

        let cleaned = timeout(self.config.clean_timeout(), self.cleaner.clean(&markdown))
            .await
            .map_err(|_| AttemptError::Timeout {
                stage: "clean",
                secs: self.config.clean_timeout_secs,
            })?
            .map_err(|e| AttemptError::Clean(e.to_string()))?;

        Ok(cleaned)
    }
}
