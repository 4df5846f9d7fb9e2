//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the crawl pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::SectionBody;
use std::future::Future;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (sitecrawl-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the underlying model, for logs and reports
    fn model_name(&self) -> &str;
}

/// Source of candidate URLs for a root URL (sitemap or link extraction)
///
/// Implemented by sitecrawl-fetch
pub trait UrlSource {
    /// Error type for URL discovery
    type Error;

    /// Candidate URLs, deduplicated, in discovery order
    fn candidate_urls(
        &self,
        root_url: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Source of the keyword set used to classify candidate URLs
///
/// Implemented by sitecrawl-refiner (LLM-generated, once per run)
pub trait KeywordSource {
    /// Error type for keyword generation
    type Error;

    /// Keywords for a run, derived from the root page content
    fn keywords(
        &self,
        root_url: &str,
        root_content: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Retrieves a page as Markdown text
///
/// Implemented by sitecrawl-fetch
pub trait ContentFetcher {
    /// Error type for fetch operations (network, timeout, HTTP status)
    type Error;

    /// Fetch a URL
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Strips boilerplate from page Markdown
///
/// Implemented by sitecrawl-refiner
pub trait ContentCleaner {
    /// Error type for cleaning operations
    type Error;

    /// Clean a page's Markdown
    fn clean(&self, markdown: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Append-only destination for report sections
///
/// Implemented by sitecrawl-store
pub trait ReportSink {
    /// Error type for append operations
    type Error;

    /// Append one section keyed by URL
    fn append_section(&mut self, url: &str, body: &SectionBody) -> Result<(), Self::Error>;
}
