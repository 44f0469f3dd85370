// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording notifier for contact-intake tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vouch_core::types::ContactSubmission;
use vouch_core::{Notifier, VouchError};

/// A notifier that captures every submission it is asked to send.
///
/// Calls are recorded even when the notifier is set to fail, so tests can
/// assert that a delivery was attempted.
#[derive(Clone, Default)]
pub struct MockNotifier {
    calls: Arc<Mutex<Vec<ContactSubmission>>>,
    failing: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call returns an error.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    pub async fn calls(&self) -> Vec<ContactSubmission> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Poll until at least `count` calls were recorded or `timeout` elapses.
    ///
    /// Returns the number of calls seen at the end.
    pub async fn wait_for_calls(&self, count: usize, timeout: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let seen = self.call_count().await;
            if seen >= count || tokio::time::Instant::now() >= deadline {
                return seen;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), VouchError> {
        self.calls.lock().await.push(submission.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(VouchError::Notifier {
                message: "mock notifier configured to fail".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}
