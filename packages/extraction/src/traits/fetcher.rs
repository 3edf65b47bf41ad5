//! Fetcher trait for pluggable page retrieval.
//!
//! A fetcher turns a URL into a [`PageSnapshot`]. The two production
//! implementations are the plain HTTP [`StaticFetcher`] and the
//! browser-driven [`RenderedFetcher`], which can operate a dropdown
//! before capturing the rendered document.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{Fetcher, StaticFetcher};
//!
//! let fetcher = StaticFetcher::new();
//! let page = fetcher.fetch("https://example.com").await?;
//! ```
//!
//! [`StaticFetcher`]: crate::fetchers::StaticFetcher
//! [`RenderedFetcher`]: crate::fetchers::RenderedFetcher

use async_trait::async_trait;

use crate::error::Result;
use crate::types::page::PageSnapshot;

/// Retrieves the markup of a single page.
///
/// Implementations do not retry; the first failure is returned.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its markup.
    async fn fetch(&self, url: &str) -> Result<PageSnapshot>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, url: &str) -> Result<PageSnapshot> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
