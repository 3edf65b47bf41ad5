//! Test doubles for code that depends on [`Channel`].

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::channel::{Channel, NotifyError};

/// Records every message it is asked to send. Clones share state.
#[derive(Debug, Clone)]
pub struct MockChannel {
    name: String,
    fail: bool,
    attempts: Arc<RwLock<Vec<String>>>,
}

impl MockChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail: false,
            attempts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A channel whose every send fails with HTTP 500.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Messages delivered successfully.
    pub fn sent(&self) -> Vec<String> {
        if self.fail {
            return Vec::new();
        }
        self.attempts.read().map(|a| a.clone()).unwrap_or_default()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.read().map(|a| a.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Channel for MockChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        if let Ok(mut attempts) = self.attempts.write() {
            attempts.push(message.to_string());
        }

        if self.fail {
            return Err(NotifyError::Status {
                channel: self.name.clone(),
                status: 500,
                detail: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}
