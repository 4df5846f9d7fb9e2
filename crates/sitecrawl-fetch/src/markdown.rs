//! HTML to Markdown-ish text
//!
//! Deliberately small: headings, paragraphs, list items, quotes and code
//! blocks in document order. Layout noise (navigation, footers) is left in
//! place for the LLM cleaner to remove.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote", "td",
];

static BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, pre, blockquote, td").expect("static selector")
});

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("static regex"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex"));

/// Convert an HTML document to Markdown text
pub fn html_to_markdown(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    let title = document
        .select(&TITLE)
        .next()
        .map(|t| collapse_whitespace(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty());
    if let Some(title) = &title {
        out.push_str(&format!("# {}\n\n", title));
    }

    for element in document.select(&BLOCKS) {
        if has_block_ancestor(&element) {
            continue;
        }

        let name = element.value().name();
        if name == "pre" {
            let code = element.text().collect::<String>();
            let code = code.trim_matches('\n');
            if !code.trim().is_empty() {
                out.push_str(&format!("```\n{}\n```\n\n", code));
            }
            continue;
        }

        let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        if text.is_empty() {
            continue;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                // The page title already occupies the top-level heading
                if level == 1 && title.as_deref() == Some(text.as_str()) {
                    continue;
                }
                let depth = (level + 1).min(6);
                out.push_str(&format!("{} {}\n\n", "#".repeat(depth), text));
            }
            "li" => out.push_str(&format!("- {}\n", text)),
            "blockquote" => out.push_str(&format!("> {}\n\n", text)),
            _ => out.push_str(&format!("{}\n\n", text)),
        }
    }

    tidy(&out)
}

/// Remove Markdown images and squeeze runs of blank lines
pub fn tidy(markdown: &str) -> String {
    let cleaned = IMAGE.replace_all(markdown, "");
    BLANK_LINES.replace_all(&cleaned, "\n\n").trim().to_string()
}

/// Truncate to at most `max_bytes`, on a char boundary
pub fn truncate(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn has_block_ancestor(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|e| BLOCK_TAGS.contains(&e.name()))
            .unwrap_or(false)
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
