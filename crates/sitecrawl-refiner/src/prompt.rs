//! Fixed prompts for keyword generation and noise removal

use tracing::warn;

/// Builds the prompts sent to the LLM
///
/// Inputs are cut to a character budget on a char boundary, so a large page
/// never produces an unbounded prompt.
pub struct PromptBuilder {
    max_chars: usize,
}

impl PromptBuilder {
    /// Create a builder limiting page content to `max_chars` characters
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Prompt asking for keywords, URL patterns and categories of a site
    pub fn keywords(&self, root_url: &str, root_content: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(KEYWORD_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("Website: {}\n", root_url));
        prompt.push_str("Content:\n---\n");
        prompt.push_str(self.limit(root_content));
        prompt.push_str("\n---\n\n");
        prompt.push_str(KEYWORD_FORMAT_REMINDER);

        prompt
    }

    /// Prompt asking to strip layout noise from page Markdown
    pub fn clean(&self, markdown: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(CLEAN_INSTRUCTIONS);
        prompt.push_str("\n\nContent:\n---\n");
        prompt.push_str(self.limit(markdown));
        prompt.push_str("\n---\n\n");
        prompt.push_str("Return only the cleaned Markdown:");

        prompt
    }

    fn limit<'a>(&self, text: &'a str) -> &'a str {
        let (kept, dropped) = split_at_chars(text, self.max_chars);
        if dropped > 0 {
            warn!(
                "Content exceeds {} chars; dropping the last {} chars before sending it to the LLM",
                self.max_chars, dropped
            );
        }
        kept
    }
}

/// First `max_chars` characters of `text` and the number of characters cut off
fn split_at_chars(text: &str, max_chars: usize) -> (&str, usize) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], text[idx..].chars().count()),
        None => (text, 0),
    }
}

const KEYWORD_INSTRUCTIONS: &str = r#"Based on the following website content, identify important keywords,
patterns, and categories that should be prioritized for web crawling.

Please extract:
1. Important keywords (API, documentation, guide, tutorial, etc.)
2. URL patterns that indicate valuable content
3. Content categories that should be prioritized"#;

const KEYWORD_FORMAT_REMINDER: &str = r#"Return your response as JSON with this structure (no additional text):
{
  "keywords": ["api", "documentation", "guide"],
  "patterns": ["/docs/", "/api/", "/tutorial/"],
  "categories": ["documentation", "api-reference", "guides"]
}"#;

const CLEAN_INSTRUCTIONS: &str = r#"Given the Markdown content of a web page, remove:
- Navigation menus and headers
- Footer content
- Sidebar content
- Advertisement blocks
- Cookie notices
- Social media widgets
- Duplicate or redundant text and error messages

Do NOT summarize or rewrite the content, just remove obvious noise and keep
the main text as Markdown."#;
