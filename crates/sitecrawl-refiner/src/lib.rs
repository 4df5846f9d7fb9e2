//! Sitecrawl Refiner
//!
//! The two LLM tasks of a crawl run.
//!
//! # Overview
//!
//! - **Keyword generation**: once per run, the root page is turned into a
//!   [`KeywordSet`] (keywords, URL patterns, categories) whose terms drive the
//!   relevance classifier
//! - **Noise removal**: every fetched page is passed through the LLM to strip
//!   navigation, footers, sidebars and ads, without summarizing
//!
//! # Architecture
//!
//! ```text
//! root page → KeywordGenerator → LLM → KeywordSet → Classifier
//! page Markdown → NoiseCleaner → LLM → cleaned Markdown → report
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use sitecrawl_refiner::{KeywordGenerator, NoiseCleaner, RefinerConfig};
//! use sitecrawl_domain::traits::{ContentCleaner, KeywordSource};
//! use sitecrawl_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"keywords": ["docs"], "patterns": ["/api/"]}"#);
//! let generator = KeywordGenerator::new(llm, RefinerConfig::default());
//! let keywords = generator.keywords("https://a.com", "# Welcome").await?;
//! assert_eq!(keywords, vec!["docs", "/api/"]);
//!
//! let cleaner = NoiseCleaner::new(MockProvider::new("# Title\n\nBody"), RefinerConfig::default());
//! let cleaned = cleaner.clean("Menu | Home\n\n# Title\n\nBody").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cleaner;
mod config;
mod error;
mod keywords;
mod parser;
mod prompt;
mod types;


pub use cleaner::NoiseCleaner;
pub use config::RefinerConfig;
pub use error::RefineError;
pub use keywords::KeywordGenerator;
pub use parser::parse_keyword_response;
pub use types::KeywordSet;
