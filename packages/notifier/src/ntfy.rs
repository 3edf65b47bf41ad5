//! ntfy push-topic channel.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::channel::{check_status, http_client, Channel, NotifyError};

pub const DEFAULT_NTFY_BASE_URL: &str = "https://ntfy.sh";

#[derive(Debug, Clone)]
pub struct NtfyOptions {
    pub topic: String,
    pub base_url: String,
}

impl NtfyOptions {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            base_url: DEFAULT_NTFY_BASE_URL.to_string(),
        }
    }

    /// Enabled only when a topic is set.
    pub fn is_enabled(&self) -> bool {
        !self.topic.trim().is_empty()
    }
}

/// Publishes the message as a plain-text body to `{base}/{topic}`.
#[derive(Debug, Clone)]
pub struct NtfyChannel {
    client: Client,
    url: String,
}

impl NtfyChannel {
    pub fn new(options: &NtfyOptions) -> Self {
        Self {
            client: http_client(),
            url: format!(
                "{}/{}",
                options.base_url.trim_end_matches('/'),
                options.topic.trim()
            ),
        }
    }

    /// Point the channel at another server (self-hosted ntfy, tests).
    pub fn with_base_url(topic: &str, base_url: &str) -> Self {
        Self::new(&NtfyOptions {
            topic: topic.to_string(),
            base_url: base_url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Channel for NtfyChannel {
    fn name(&self) -> &str {
        "ntfy"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        debug!(url = %self.url, bytes = message.len(), "Publishing to ntfy");

        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(message.to_string())
            .send()
            .await
            .map_err(|source| NotifyError::Http {
                channel: self.name().to_string(),
                source,
            })?;

        check_status(self.name(), response).await?;
        Ok(())
    }
}
