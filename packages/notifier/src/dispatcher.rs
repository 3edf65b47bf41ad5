//! Fan-out of one message to every configured channel.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::channel::Channel;
use crate::ntfy::{NtfyChannel, NtfyOptions};
use crate::telegram::{TelegramChannel, TelegramOptions};

/// Join title and body the way every channel receives them.
pub fn compose_message(title: &str, body: &str) -> String {
    format!("{title}\n\n{body}").trim().to_string()
}

/// Delivers a message to zero or more channels.
///
/// Each enabled channel gets exactly one attempt. Failures are logged and
/// isolated: one channel failing never prevents or cancels the others, and
/// `notify` itself cannot fail.
#[derive(Default)]
pub struct Notifier {
    channels: Vec<Box<dyn Channel>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a notifier with the built-in channels whose credentials are set.
    pub fn from_options(ntfy: &NtfyOptions, telegram: &TelegramOptions) -> Self {
        let mut notifier = Self::new();
        if ntfy.is_enabled() {
            notifier.add_channel(Box::new(NtfyChannel::new(ntfy)));
        }
        if telegram.is_enabled() {
            notifier.add_channel(Box::new(TelegramChannel::new(telegram)));
        }
        notifier
    }

    pub fn with_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    pub fn add_channel(&mut self, channel: Box<dyn Channel>) {
        self.channels.push(channel);
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Compose `title` and `body` and send the result everywhere.
    pub async fn notify(&self, title: &str, body: &str) {
        let message = compose_message(title, body);
        self.send(&message).await;
    }

    /// Send an already composed message to every channel concurrently.
    pub async fn send(&self, message: &str) {
        if self.channels.is_empty() {
            info!("No notification channels configured; nothing sent");
            return;
        }

        let results = join_all(self.channels.iter().map(|channel| async move {
            (channel.name(), channel.send(message).await)
        }))
        .await;

        let mut delivered = 0usize;
        for (name, result) in &results {
            match result {
                Ok(()) => {
                    debug!(channel = %name, "Notification delivered");
                    delivered += 1;
                }
                Err(e) => warn!(channel = %name, error = %e, "Notification failed"),
            }
        }

        info!(
            attempted = results.len(),
            delivered,
            "Notification dispatch finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChannel;

    #[test]
    fn test_compose_message_trims() {
        assert_eq!(compose_message("Hay 1", "• Ana"), "Hay 1\n\n• Ana");
        assert_eq!(compose_message("Hay 0", ""), "Hay 0");
        assert_eq!(compose_message("  ", "  cuerpo  "), "cuerpo");
    }

    #[test]
    fn test_from_options_only_enables_configured_channels() {
        let ntfy = NtfyOptions::new("vacantes");
        let telegram = TelegramOptions::new("123:abc", "");
        let notifier = Notifier::from_options(&ntfy, &telegram);

        assert_eq!(notifier.channel_names(), ["ntfy"]);

        let notifier = Notifier::from_options(&NtfyOptions::new(""), &telegram);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_notify_sends_same_message_to_each_channel() {
        let a = MockChannel::new("a");
        let b = MockChannel::new("b");
        let notifier = Notifier::new().with_channel(a.clone()).with_channel(b.clone());

        notifier.notify("Hay 2 vacantes", "• Ana\n____\n• Carla").await;

        let expected = "Hay 2 vacantes\n\n• Ana\n____\n• Carla";
        assert_eq!(a.sent(), [expected]);
        assert_eq!(b.sent(), [expected]);
    }

    #[tokio::test]
    async fn test_failing_channel_does_not_block_others() {
        let broken = MockChannel::failing("broken");
        let ok = MockChannel::new("ok");
        let notifier = Notifier::new()
            .with_channel(broken.clone())
            .with_channel(ok.clone());

        notifier.notify("t", "b").await;

        assert_eq!(broken.attempts(), 1);
        assert_eq!(ok.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_no_channels_is_a_no_op() {
        Notifier::new().notify("t", "b").await;
    }
}
