//! Command implementations.

pub mod classify;
pub mod config;
pub mod crawl;
pub mod status;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::crawl::{execute_crawl, execute_resume};
pub use self::status::execute_status;

use crate::config::Config;
use crate::error::Result;
use sitecrawl_domain::RunContext;
use sitecrawl_fetch::HttpFetcher;
use sitecrawl_llm::OllamaProvider;
use sitecrawl_orchestrator::Orchestrator;
use sitecrawl_refiner::{KeywordGenerator, NoiseCleaner};

/// The production pipeline: HTTP discovery and fetching, Ollama for keywords and cleaning.
pub type SiteOrchestrator =
    Orchestrator<HttpFetcher, KeywordGenerator<OllamaProvider>, HttpFetcher, NoiseCleaner<OllamaProvider>>;

/// Wire the pipeline from configuration.
pub fn build_orchestrator(config: &Config) -> Result<SiteOrchestrator> {
    let fetcher = HttpFetcher::new(config.fetch.clone())?;
    let llm = OllamaProvider::new(config.llm.clone())?;

    let keywords = KeywordGenerator::new(llm.clone(), config.refiner.clone());
    let cleaner = NoiseCleaner::new(llm, config.refiner.clone());

    Ok(Orchestrator::new(
        fetcher.clone(),
        keywords,
        fetcher,
        cleaner,
        config.crawl.clone(),
    )?)
}

/// Run context for `url` under the configured storage directories.
pub fn run_context(config: &Config, url: &str) -> RunContext {
    RunContext::new(url, &config.storage.state_dir, &config.storage.output_dir)
}
