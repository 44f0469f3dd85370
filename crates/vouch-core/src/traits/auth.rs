// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity provider capability for admin sign-in.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::VouchError;
use crate::types::{AuthSession, Credentials, SessionEvent};

/// Adapter for authenticating admin editors and tracking their sessions.
///
/// The services themselves never check authorization; the HTTP layer gates
/// admin routes on [`AuthProvider::get_session`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies credentials and opens a session.
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, VouchError>;

    /// Resolves a session token. Expired or unknown tokens yield `None`.
    async fn get_session(&self, token: &str) -> Result<Option<AuthSession>, VouchError>;

    /// Ends a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str) -> Result<(), VouchError>;

    /// Subscribes to session lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
