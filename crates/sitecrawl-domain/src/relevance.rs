//! Relevance classification of candidate URLs
//!
//! A URL is HIGH when it contains any of the run's keywords as a substring,
//! LOW otherwise. Only HIGH URLs become crawl targets.

use std::fmt;

/// Relevance label of a candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relevance {
    /// Matches at least one keyword; will be crawled
    High,

    /// Matches nothing; skipped
    Low,
}

impl Relevance {
    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::High => "HIGH",
            Relevance::Low => "LOW",
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-based URL classifier
///
/// # Examples
///
/// ```
/// use sitecrawl_domain::{Classifier, Relevance};
///
/// let classifier = Classifier::new(["docs", "/api/"]);
/// assert_eq!(classifier.classify("https://a.com/docs/intro"), Relevance::High);
/// assert_eq!(classifier.classify("https://a.com/blog"), Relevance::Low);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    keywords: Vec<String>,
    case_insensitive: bool,
}

impl Classifier {
    /// Create a case-sensitive classifier
    ///
    /// Empty keywords are dropped: an empty needle would match every URL.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(Into::<String>::into)
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            keywords,
            case_insensitive: false,
        }
    }

    /// Compare URLs and keywords case-insensitively
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Keywords in use
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Label a single URL
    pub fn classify(&self, url: &str) -> Relevance {
        let matched = if self.case_insensitive {
            let url = url.to_lowercase();
            self.keywords
                .iter()
                .any(|k| url.contains(&k.to_lowercase()))
        } else {
            self.keywords.iter().any(|k| url.contains(k.as_str()))
        };

        if matched {
            Relevance::High
        } else {
            Relevance::Low
        }
    }

    /// Keep the HIGH URLs, preserving input order
    pub fn partition<'a, I>(&self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        urls.into_iter()
            .filter(|url| self.classify(url) == Relevance::High)
            .cloned()
            .collect()
    }
}
