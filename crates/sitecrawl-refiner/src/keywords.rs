//! LLM-backed keyword generation

use crate::config::RefinerConfig;
use crate::error::RefineError;
use crate::parser::parse_keyword_response;
use crate::prompt::PromptBuilder;
use crate::types::KeywordSet;
use sitecrawl_domain::traits::{KeywordSource, LlmProvider};
use std::fmt::Display;
use tokio::time::timeout;
use tracing::{debug, info};

/// Derives the keyword set of a site from its root page, with one LLM call
pub struct KeywordGenerator<L: LlmProvider> {
    llm_provider: L,
    config: RefinerConfig,
}

impl<L> KeywordGenerator<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    /// Create a new keyword generator
    pub fn new(llm_provider: L, config: RefinerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    /// Ask the LLM for the full keyword set of a site
    pub async fn generate(&self, root_url: &str, root_content: &str) -> Result<KeywordSet, RefineError> {
        let prompt = PromptBuilder::new(self.config.keyword_input_chars).keywords(root_url, root_content);
        debug!("Keyword prompt length: {} chars", prompt.len());

        let response = timeout(self.config.llm_timeout(), self.llm_provider.generate(&prompt))
            .await
            .map_err(|_| RefineError::Timeout(self.config.llm_timeout_secs))?
            .map_err(|e| RefineError::Llm(e.to_string()))?;

        let set = parse_keyword_response(&response)?;
        info!(
            "Generated {} keywords and {} patterns for {} with {}",
            set.keywords.len(),
            set.patterns.len(),
            root_url,
            self.llm_provider.model_name()
        );
        Ok(set)
    }
}

impl<L> KeywordSource for KeywordGenerator<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    type Error = RefineError;

    async fn keywords(&self, root_url: &str, root_content: &str) -> Result<Vec<String>, Self::Error> {
        let set = self.generate(root_url, root_content).await?;
        Ok(set.terms(self.config.include_patterns))
    }
}
