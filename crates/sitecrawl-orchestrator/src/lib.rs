//! Sitecrawl Orchestrator
//!
//! Plans a crawl run and drives it URL by URL.
//!
//! # Overview
//!
//! - **Planning**: candidate URLs → root page → keywords → HIGH URLs →
//!   progress tracker (skipped when resuming existing state)
//! - **Draining**: for each pending target, fetch → clean → append to the
//!   report → mark success; failures are recorded per URL and never stop
//!   the pass
//! - **Retry policy**: a failed target is attempted at most once per pass
//!   and is retried by later invocations until `max_attempts` is reached
//!
//! # Usage
//!
//! ```no_run
//! use sitecrawl_domain::RunContext;
//! use sitecrawl_orchestrator::{Orchestrator, OrchestratorConfig};
//! use sitecrawl_store::{InitMode, MarkdownReport};
//! # use sitecrawl_domain::traits::{ContentCleaner, ContentFetcher, KeywordSource, UrlSource};
//! # async fn example<U, K, F, C>(urls: U, keywords: K, fetcher: F, cleaner: C) -> Result<(), Box<dyn std::error::Error>>
//! # where
//! #     U: UrlSource, U::Error: std::fmt::Display,
//! #     K: KeywordSource, K::Error: std::fmt::Display,
//! #     F: ContentFetcher, F::Error: std::fmt::Display,
//! #     C: ContentCleaner, C::Error: std::fmt::Display,
//! # {
//! let orchestrator = Orchestrator::new(urls, keywords, fetcher, cleaner, OrchestratorConfig::default())?;
//! let ctx = RunContext::new("https://a.com/", "state", "output");
//!
//! let mut tracker = orchestrator.plan(&ctx, InitMode::Resume).await?;
//! let mut report = MarkdownReport::new(&ctx.report_path);
//! let pass = orchestrator.drain(&mut tracker, &mut report).await?;
//! println!("{}", pass.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [crawl]
//! max_attempts = 3
//! fetch_timeout_secs = 60
//! clean_timeout_secs = 180
//! request_delay_ms = 1000
//! case_insensitive = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod orchestrator;

pub use config::OrchestratorConfig;
pub use error::{AttemptError, OrchestratorError};
pub use metrics::{FailedAttempt, PassReport};
pub use orchestrator::{Discovery, Orchestrator, RunReport};
