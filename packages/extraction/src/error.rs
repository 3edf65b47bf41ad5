//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Every variant here aborts
//! the current check; nothing in this crate retries.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching, extracting or filtering a page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Plain HTTP fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration is unusable for the requested operation
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Browser automation failed
    #[error("browser interaction failed: {0}")]
    Interaction(#[from] InteractionError),
}

/// Errors from the plain HTTP fetch path.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered outside the 2xx range
    #[error("HTTP {status}: {reason} ({url})")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Status code carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }
}

/// Configuration errors detected at fetch or extraction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A dropdown control was configured without saying which option to pick
    #[error("dropdown {selector:?} needs an option value or an option label")]
    MissingDropdownOption { selector: String },

    /// Both an option value and an option label were configured
    #[error("dropdown {selector:?} has both an option value and an option label; set only one")]
    AmbiguousDropdownOption { selector: String },

    /// A CSS selector could not be parsed
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Errors raised while driving the browser.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// The browser process could not be started
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to the target page failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A bounded wait expired
    #[error("timed out after {duration:?} waiting for {what}")]
    Timeout { what: String, duration: Duration },

    /// The native select control has no option with this value or label
    #[error("dropdown {selector:?} has no option {option}")]
    OptionNotFound { selector: String, option: String },

    /// Any other protocol-level failure reported by the browser
    #[error("browser error: {0}")]
    Browser(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
