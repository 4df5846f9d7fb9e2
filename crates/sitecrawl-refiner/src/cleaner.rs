//! LLM-backed noise removal

use crate::config::RefinerConfig;
use crate::error::RefineError;
use crate::prompt::PromptBuilder;
use sitecrawl_domain::traits::{ContentCleaner, LlmProvider};
use std::fmt::Display;
use tokio::time::timeout;
use tracing::debug;

/// Removes navigation, footers, ads and similar noise from page Markdown
///
/// The LLM is asked not to summarize; its answer is taken as the cleaned
/// page, minus a wrapping code fence if the model added one.
pub struct NoiseCleaner<L: LlmProvider> {
    llm_provider: L,
    config: RefinerConfig,
}

impl<L> NoiseCleaner<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    /// Create a new cleaner
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
}

impl<L> ContentCleaner for NoiseCleaner<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    type Error = RefineError;

    async fn clean(&self, markdown: &str) -> Result<String, Self::Error> {
        let prompt = PromptBuilder::new(self.config.clean_input_chars).clean(markdown);

        let response = timeout(self.config.llm_timeout(), self.llm_provider.generate(&prompt))
            .await
            .map_err(|_| RefineError::Timeout(self.config.llm_timeout_secs))?
            .map_err(|e| RefineError::Llm(e.to_string()))?;

        let cleaned = strip_fence(response.trim());
        if cleaned.is_empty() {
            return Err(RefineError::EmptyResponse);
        }

        debug!("Cleaned {} chars down to {}", markdown.len(), cleaned.len());
        Ok(cleaned.to_string())
    }
}

/// Remove a code fence wrapping the whole response (```markdown ... ```)
fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some((_, body)) = rest.split_once('\n') else {
        return text;
    };
    match body.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => text,
    }
}
