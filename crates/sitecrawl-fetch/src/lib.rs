//! Sitecrawl Fetch
//!
//! HTTP-side collaborators of the crawl pipeline:
//!
//! - **URL discovery**: `<root>/sitemap.xml` (one level of sitemap index is
//!   followed), falling back to same-host links on the root page
//! - **Content fetching**: GET a page and reduce it to Markdown text
//!
//! # Architecture
//!
//! ```text
//! root URL → sitemap.xml ─┬→ candidate URLs → classifier
//!                         └→ (fallback) root page <a href>
//! target URL → GET → HTML → Markdown → cleaner
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
pub mod links;
pub mod markdown;
pub mod sitemap;

pub use client::{FetchedBody, HttpFetcher};
pub use config::FetchConfig;
pub use error::FetchError;
pub use sitemap::{parse_sitemap, Sitemap};
