//! Keyword set produced from a root page

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the LLM considers worth crawling on a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    /// Words expected in valuable URLs (`api`, `docs`, ...)
    #[serde(default)]
    pub keywords: Vec<String>,

    /// URL fragments marking valuable sections (`/docs/`, ...)
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Content categories; informational only
    #[serde(default)]
    pub categories: Vec<String>,
}

impl KeywordSet {
    /// Whether neither keywords nor patterns were found
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.patterns.is_empty()
    }

    /// Terms used for URL classification
    ///
    /// Keywords first, then patterns when `include_patterns` is set; trimmed,
    /// empty entries dropped, duplicates removed keeping the first.
    pub fn terms(&self, include_patterns: bool) -> Vec<String> {
        let patterns: &[String] = if include_patterns { &self.patterns } else { &[] };
        let mut seen = HashSet::new();
        self.keywords
            .iter()
            .chain(patterns)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.to_string()))
            .map(str::to_string)
            .collect()
    }
}
