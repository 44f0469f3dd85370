// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notification capability for contact submissions.

use async_trait::async_trait;

use crate::error::VouchError;
use crate::types::ContactSubmission;

/// Sends a notification about a new contact submission.
///
/// Callers run this fire-and-forget: a failure is logged, never surfaced to
/// the visitor, and never rolls back the stored submission.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), VouchError>;
}
