//! Plain HTTP fetcher.
//!
//! One GET request, no JavaScript. Use [`RenderedFetcher`] for pages that
//! build their tables client-side.
//!
//! [`RenderedFetcher`]: super::RenderedFetcher

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};
use crate::traits::fetcher::Fetcher;
use crate::types::page::PageSnapshot;

/// User agent sent with every static fetch.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; WebsiteContentMonitor/1.0; +https://github.com)";

/// HTTP fetcher that returns the response body as-is.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::fetchers::StaticFetcher;
///
/// let fetcher = StaticFetcher::new();
/// let page = fetcher.fetch("https://example.com").await?;
/// ```
pub struct StaticFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for StaticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFetcher {
    /// Create a new fetcher with a 30 second request timeout.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<PageSnapshot> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        debug!(url = %url, content_length = html.len(), "Page fetched successfully");

        Ok(PageSnapshot::new(url, html))
    }

    fn name(&self) -> &str {
        "static"
    }
}
