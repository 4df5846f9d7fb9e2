//! Sitemap parsing
//!
//! Handles both `<urlset>` documents and `<sitemapindex>` documents. Element
//! names are matched on their local part, so namespaced and prefixed
//! sitemaps parse the same way.

use crate::error::FetchError;
use quick_xml::events::Event;

/// Parsed sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sitemap {
    /// `<loc>` of every `<url>` entry, in document order
    pub urls: Vec<String>,

    /// `<loc>` of every `<sitemap>` entry of a sitemap index
    pub children: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Entry {
    None,
    Url,
    Sitemap,
}

/// Parse a sitemap or sitemap index
pub fn parse_sitemap(xml: &str) -> Result<Sitemap, FetchError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut sitemap = Sitemap::default();
    let mut entry = Entry::None;
    let mut in_loc = false;
    let mut loc = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"urlset" | b"sitemapindex" => saw_root = true,
                b"url" => entry = Entry::Url,
                b"sitemap" => entry = Entry::Sitemap,
                b"loc" if entry != Entry::None => {
                    in_loc = true;
                    loc.clear();
                }
                _ => {}
            },
            Event::Text(e) if in_loc => {
                let text = e.unescape().map_err(|e| FetchError::Sitemap(e.to_string()))?;
                loc.push_str(&text);
            }
            Event::CData(e) if in_loc => {
                loc.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"loc" if in_loc => {
                    in_loc = false;
                    let value = loc.trim();
                    if !value.is_empty() {
                        match entry {
                            Entry::Url => sitemap.urls.push(value.to_string()),
                            Entry::Sitemap => sitemap.children.push(value.to_string()),
                            Entry::None => {}
                        }
                    }
                }
                b"url" | b"sitemap" => entry = Entry::None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(FetchError::Sitemap(
            "document has no <urlset> or <sitemapindex> root".to_string(),
        ));
    }

    Ok(sitemap)
}
