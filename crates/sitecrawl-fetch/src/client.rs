//! HTTP implementation of the fetch-side collaborators

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::links::{extract_links, is_valid_url};
use crate::markdown::{html_to_markdown, tidy, truncate};
use crate::sitemap::parse_sitemap;
use sitecrawl_domain::traits::{ContentFetcher, UrlSource};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A fetched response body
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// Final URL after redirects
    pub url: String,
    /// Response body as text
    pub text: String,
    /// Whether the server declared an HTML content type
    pub is_html: bool,
}

/// HTTP client for sitemaps and pages
///
/// Implements [`UrlSource`] (sitemap, falling back to root-page links) and
/// [`ContentFetcher`] (page → Markdown).
///
/// # Examples
///
/// ```no_run
/// use sitecrawl_fetch::{FetchConfig, HttpFetcher};
/// use sitecrawl_domain::traits::{ContentFetcher, UrlSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(FetchConfig::default())?;
/// let urls = fetcher.candidate_urls("https://fast-agent.ai/").await?;
/// let page = fetcher.fetch(&urls[0]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        config.validate().map_err(FetchError::Config)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Current configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET a URL and return its body, failing on non-success statuses
    pub async fn get(&self, url: &str) -> Result<FetchedBody, FetchError> {
        if !is_valid_url(url) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("html"))
            .unwrap_or(false);
        let text = response.text().await?;

        Ok(FetchedBody {
            url: final_url,
            text,
            is_html,
        })
    }

    /// Fetch a page as Markdown text, truncated to `max_content_length`
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get(url).await?;

        let markdown = if body.is_html {
            html_to_markdown(&body.text)
        } else {
            tidy(&body.text)
        };

        if markdown.trim().is_empty() {
            return Err(FetchError::Empty(url.to_string()));
        }

        let limited = truncate(&markdown, self.config.max_content_length);
        if limited.len() < markdown.len() {
            debug!("Truncated {} from {} to {} bytes", url, markdown.len(), limited.len());
        }
        Ok(limited.to_string())
    }

    /// URLs listed in the root's sitemap, following one level of sitemap index
    pub async fn sitemap_urls(&self, root_url: &str) -> Result<Vec<String>, FetchError> {
        let sitemap_url = format!(
            "{}/{}",
            root_url.trim_end_matches('/'),
            self.config.sitemap_path.trim_start_matches('/')
        );

        info!("Fetching sitemap: {}", sitemap_url);
        let body = self.get(&sitemap_url).await?;
        let sitemap = parse_sitemap(&body.text)?;
        let mut urls = sitemap.urls;

        for child in &sitemap.children {
            match self.get(child).await.and_then(|b| parse_sitemap(&b.text)) {
                Ok(nested) => urls.extend(nested.urls),
                Err(e) => warn!("Skipping child sitemap {}: {}", child, e),
            }
        }

        info!("Total URLs in sitemap: {}", urls.len());
        Ok(urls)
    }

    /// Same-host links found on the root page
    pub async fn root_links(&self, root_url: &str) -> Result<Vec<String>, FetchError> {
        let body = self.get(root_url).await?;
        let links = extract_links(&body.text, &body.url);
        info!("Extracted {} links from {}", links.len(), root_url);
        Ok(links)
    }
}

impl ContentFetcher for HttpFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        self.fetch_page(url).await
    }
}

impl UrlSource for HttpFetcher {
    type Error = FetchError;

    async fn candidate_urls(&self, root_url: &str) -> Result<Vec<String>, Self::Error> {
        if !is_valid_url(root_url) {
            return Err(FetchError::InvalidUrl(root_url.to_string()));
        }

        let urls = match self.sitemap_urls(root_url).await {
            Ok(urls) if !urls.is_empty() => urls,
            Ok(_) if self.config.link_fallback => {
                warn!("Sitemap for {} is empty, falling back to page links", root_url);
                self.root_links(root_url).await?
            }
            Err(e) if self.config.link_fallback => {
                warn!("No usable sitemap for {} ({}), falling back to page links", root_url, e);
                self.root_links(root_url).await?
            }
            Ok(urls) => urls,
            Err(e) => return Err(e),
        };

        Ok(dedup(urls))
    }
}

fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}
