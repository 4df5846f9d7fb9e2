//! Link extraction from rendered HTML

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// Extract same-host http(s) links from an HTML page
///
/// Relative links are resolved against `base_url`; fragments are dropped;
/// `mailto:`/`javascript:` links and links to other hosts are skipped.
/// Order follows the document, duplicates removed.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("javascript:")
        {
            continue;
        }

        let Ok(mut url) = base.join(href) else {
            continue;
        };
        if url.scheme() != "http" && url.scheme() != "https" {
            continue;
        }
        if url.host_str() != base.host_str() {
            continue;
        }
        url.set_fragment(None);

        let url = url.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

/// Whether `url` parses as an absolute http(s) URL
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| (u.scheme() == "http" || u.scheme() == "https") && u.host_str().is_some())
        .unwrap_or(false)
}
