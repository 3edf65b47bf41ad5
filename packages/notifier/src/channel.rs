//! The `Channel` abstraction every transport implements.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Request timeout for every outbound notification.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A delivery failure on one channel. Never fatal for the run.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The service answered outside the 2xx range
    #[error("{channel} returned HTTP {status}: {detail}")]
    Status {
        channel: String,
        status: u16,
        detail: String,
    },

    /// The request did not complete
    #[error("{channel} request failed: {source}")]
    Http {
        channel: String,
        #[source]
        source: reqwest::Error,
    },
}

impl NotifyError {
    pub fn channel(&self) -> &str {
        match self {
            Self::Status { channel, .. } | Self::Http { channel, .. } => channel,
        }
    }
}

/// One-way notification transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Deliver `message` once.
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}

/// HTTP client shared by the built-in channels.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Map a non-success response to [`NotifyError::Status`], keeping the body as detail.
pub(crate) async fn check_status(
    channel: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(NotifyError::Status {
        channel: channel.to_string(),
        status: status.as_u16(),
        detail: if detail.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            detail
        },
    })
}
