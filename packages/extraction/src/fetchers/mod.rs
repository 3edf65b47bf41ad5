//! Fetcher implementations.
//!
//! - `StaticFetcher` - single HTTP GET
//! - `RenderedFetcher` - headless Chrome with optional dropdown interaction
//!   (requires the `browser` feature)
//! - `MockFetcher` - for testing

mod http;
mod mock;

#[cfg(feature = "browser")]
mod browser;

pub use http::{StaticFetcher, DEFAULT_USER_AGENT};
pub use mock::MockFetcher;

#[cfg(feature = "browser")]
pub use browser::{
    RenderedFetcher, CONTENT_WAIT_TIMEOUT, CONTROL_VISIBLE_TIMEOUT, NAVIGATION_TIMEOUT,
};

// Re-export from traits for convenience
pub use crate::traits::fetcher::Fetcher;
