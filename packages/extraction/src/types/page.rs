//! Page snapshot - the immutable result of one fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Markup captured from a single fetch of a page.
///
/// A snapshot is created once per check, handed to the extractor and
/// then dropped. It is never cached between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// URL that was requested
    pub url: String,

    /// Raw or rendered HTML
    pub html: String,

    /// When the markup was captured
    pub fetched_at: DateTime<Utc>,
}

impl PageSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the capture timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Get content length in bytes.
    pub fn content_length(&self) -> usize {
        self.html.len()
    }

    /// Check if this snapshot has any markup at all.
    pub fn has_content(&self) -> bool {
        !self.html.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_content_checks() {
        let page = PageSnapshot::new("https://example.com", "<html></html>");
        assert_eq!(page.content_length(), 13);
        assert!(page.has_content());

        let blank = PageSnapshot::new("https://example.com", "  \n ");
        assert!(!blank.has_content());
    }

    #[test]
    fn test_with_fetched_at() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T07:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let page = PageSnapshot::new("https://example.com", "<p></p>").with_fetched_at(at);
        assert_eq!(page.fetched_at, at);
    }
}
