// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config-backed [`AuthProvider`] with in-memory session tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use vouch_config::model::AuthConfig;
use vouch_core::types::{AuthSession, Credentials, SessionEvent};
use vouch_core::{AdapterType, AuthProvider, HealthStatus, PluginAdapter, VouchError};

use crate::password::verify_password;

const TOKEN_BYTES: usize = 32;
const EVENT_CAPACITY: usize = 64;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Verified against for unknown emails so both failure paths cost one
/// argon2 run. Uses the default Argon2id parameters; matches no password.
const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQxMjM0NTY3OA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub struct LocalAuthProvider {
    /// Lowercased email to PHC hash.
    admins: HashMap<String, String>,
    sessions: DashMap<String, AuthSession>,
    ttl: Duration,
    events: broadcast::Sender<SessionEvent>,
    rng: SystemRandom,
}

impl LocalAuthProvider {
    pub fn from_config(config: &AuthConfig) -> Self {
        let ttl = i64::try_from(config.session_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::days(365));
        let admins = config
            .admins
            .iter()
            .map(|a| (a.email.trim().to_lowercase(), a.password_hash.clone()));
        Self::new(admins, ttl)
    }

    pub fn new(admins: impl IntoIterator<Item = (String, String)>, ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            admins: admins.into_iter().collect(),
            sessions: DashMap::new(),
            ttl,
            events,
            rng: SystemRandom::new(),
        }
    }

    /// Number of live (possibly not yet swept) sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();
        for token in &expired {
            if let Some((_, session)) = self.sessions.remove(token) {
                self.emit(SessionEvent::Expired {
                    email: session.email,
                });
            }
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "expired sessions purged");
        }
        expired.len()
    }

    fn new_token(&self) -> Result<String, VouchError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| VouchError::Internal("failed to generate session token".to_string()))?;
        Ok(hex::encode(bytes))
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl PluginAdapter for LocalAuthProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, VouchError> {
        if self.admins.is_empty() {
            return Ok(HealthStatus::Degraded(
                "no admin accounts configured".to_string(),
            ));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VouchError> {
        self.sessions.clear();
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, VouchError> {
        let email = credentials.email.trim().to_lowercase();
        let hash = self.admins.get(&email).cloned();
        let known = hash.is_some();
        let phc = hash.unwrap_or_else(|| DUMMY_PHC.to_string());

        let password = credentials.password;
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &phc))
            .await
            .map_err(|e| VouchError::Internal(format!("password check task failed: {e}")))??;
        if !known {
            warn!(email = %email, "sign-in for unknown admin");
            return Err(VouchError::Auth(INVALID_CREDENTIALS.to_string()));
        }
        if !verified {
            warn!(email = %email, "sign-in with wrong password");
            return Err(VouchError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        let created_at = Utc::now();
        let session = AuthSession {
            token: self.new_token()?,
            email: email.clone(),
            created_at,
            expires_at: created_at
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.sessions
            .insert(session.token.clone(), session.clone());
        info!(email = %email, "admin signed in");
        self.emit(SessionEvent::SignedIn { email });
        Ok(session)
    }

    async fn get_session(&self, token: &str) -> Result<Option<AuthSession>, VouchError> {
        let Some(session) = self.sessions.get(token).map(|s| s.value().clone()) else {
            return Ok(None);
        };
        if session.is_expired_at(Utc::now()) {
            self.sessions.remove(token);
            debug!(email = %session.email, "session expired");
            self.emit(SessionEvent::Expired {
                email: session.email,
            });
            return Ok(None);
        }
        Ok(Some(session))
    }

    async fn sign_out(&self, token: &str) -> Result<(), VouchError> {
        if let Some((_, session)) = self.sessions.remove(token) {
            info!(email = %session.email, "admin signed out");
            self.emit(SessionEvent::SignedOut {
                email: session.email,
            });
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
