//! Sitecrawl Domain Layer
//!
//! This crate holds the core model of a resumable site crawl and the trait
//! interfaces every other crate in the workspace builds on.
//!
//! ## Key Concepts
//!
//! - **Run**: One execution of the pipeline against a root URL, identified by
//!   a [`RunId`] derived from that URL
//! - **Target**: A single URL tracked through Pending → Success / Failed
//! - **Relevance**: HIGH/LOW label deciding which candidate URLs become targets
//! - **Artifact**: The append-only Markdown report of a run
//!
//! ## Architecture
//!
//! - Pure data and pure functions only (no I/O)
//! - Collaborators (fetchers, LLMs, report sinks) are traits in [`traits`]
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod relevance;
pub mod run;
pub mod section;
pub mod target;
pub mod traits;

// Re-exports for convenience
pub use relevance::{Classifier, Relevance};
pub use run::{RunContext, RunId};
pub use section::SectionBody;
pub use target::{CrawlTarget, TargetStatus};
