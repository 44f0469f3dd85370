// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use tracing::debug;
use vouch_core::types::ContactSubmission;
use vouch_core::{Notifier, VouchError};

/// Accepts every notification and sends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), VouchError> {
        debug!(id = %submission.id, "notifications disabled, skipping email");
        Ok(())
    }
}
