//! Notification delivery to push topics and chat bots.
//!
//! ```rust,ignore
//! use notifier::{Notifier, NtfyOptions, TelegramOptions};
//!
//! let notifier = Notifier::from_options(&NtfyOptions::new("vacantes"), &telegram);
//! notifier.notify("Hay 2 vacantes", "• Ana\n____\n• Carla").await;
//! ```

pub mod channel;
pub mod dispatcher;
pub mod models;
pub mod ntfy;
pub mod telegram;
pub mod testing;

pub use channel::{Channel, NotifyError, REQUEST_TIMEOUT};
pub use dispatcher::{compose_message, Notifier};
pub use ntfy::{NtfyChannel, NtfyOptions, DEFAULT_NTFY_BASE_URL};
pub use telegram::{TelegramChannel, TelegramOptions, DEFAULT_TELEGRAM_API_BASE_URL};
pub use testing::MockChannel;
