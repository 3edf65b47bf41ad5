//! Mock fetcher for testing.
//!
//! Serves canned markup by URL and records every request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, Result};
use crate::traits::fetcher::Fetcher;
use crate::types::page::PageSnapshot;

/// Mock fetcher for testing.
///
/// URLs without a canned page answer like a server returning 404.
///
/// # Example
///
/// ```rust
/// use extraction::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.com", "<table></table>")
///     .with_status("https://example.com/down", 500);
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    statuses: Arc<RwLock<HashMap<String, u16>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn add_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), html.into());
    }

    /// Answer `url` with an HTTP error status.
    pub fn add_status(&self, url: impl Into<String>, status: u16) {
        self.statuses.write().unwrap().insert(url.into(), status);
    }

    /// Builder form of [`add_page`](Self::add_page).
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add_page(url, html);
        self
    }

    /// Builder form of [`add_status`](Self::add_status).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.add_status(url, status);
        self
    }

    /// Get the number of times fetch was called.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the URLs that were requested.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<PageSnapshot> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(status) = self.statuses.read().unwrap().get(url).copied() {
            return Err(status_error(url, status).into());
        }

        match self.pages.read().unwrap().get(url) {
            Some(html) => Ok(PageSnapshot::new(url, html.clone())),
            None => Err(status_error(url, 404).into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn status_error(url: &str, status: u16) -> FetchError {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    FetchError::Status {
        url: url.to_string(),
        status,
        reason: reason.to_string(),
    }
}
