//! Telegram bot channel.
//!
//! The bot token is part of the request path, so URLs are never logged.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::channel::{check_status, http_client, Channel, NotifyError};
use crate::models::{ApiResponse, SendMessageRequest};

pub const DEFAULT_TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base_url: String,
}

impl TelegramOptions {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base_url: DEFAULT_TELEGRAM_API_BASE_URL.to_string(),
        }
    }

    /// Enabled only when both the token and the chat id are set.
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

/// Sends the message through `sendMessage` with link previews disabled.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: Client,
    base_url: String,
    chat_id: String,
}

impl TelegramChannel {
    pub fn new(options: &TelegramOptions) -> Self {
        Self {
            client: http_client(),
            base_url: format!(
                "{}/bot{}",
                options.api_base_url.trim_end_matches('/'),
                options.bot_token.trim()
            ),
            chat_id: options.chat_id.trim().to_string(),
        }
    }

    /// Create a channel against a custom API server (for testing).
    pub fn with_base_url(bot_token: &str, chat_id: &str, base_url: &str) -> Self {
        let mut options = TelegramOptions::new(bot_token, chat_id);
        options.api_base_url = base_url.to_string();
        Self::new(&options)
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        debug!(chat_id = %self.chat_id, bytes = message.len(), "sendMessage");

        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Http {
                channel: self.name().to_string(),
                source,
            })?;

        let response = check_status(self.name(), response).await?;
        let status = response.status().as_u16();

        // Some proxies answer 200 with `ok: false`.
        let text = response.text().await.unwrap_or_default();
        if let Ok(api) = serde_json::from_str::<ApiResponse>(&text) {
            if !api.ok {
                return Err(NotifyError::Status {
                    channel: self.name().to_string(),
                    status,
                    detail: api.description.unwrap_or_default(),
                });
            }
        }

        Ok(())
    }
}
