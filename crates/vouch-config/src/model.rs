// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! rejected at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VouchConfig {
    /// Site identity and logging.
    #[serde(default)]
    pub site: SiteConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Admin accounts and session lifetime.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Contact-form email notifications.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Public testimonial views and tag catalog.
    #[serde(default)]
    pub testimonials: TestimonialsConfig,
}

/// Site identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name used in notification emails.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_site_name() -> String {
    "Career Capital".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vouch").join("vouch.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("vouch.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Lifetime of an admin session in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Editors allowed to sign in to the admin console.
    #[serde(default)]
    pub admins: Vec<AdminAccount>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl_secs(),
            admins: Vec::new(),
        }
    }
}

fn default_session_ttl_secs() -> u64 {
    60 * 60 * 8
}

/// A single admin editor (`[[auth.admins]]`).
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminAccount {
    /// Login email.
    pub email: String,

    /// Argon2 PHC string, as printed by `vouch hash-password`.
    pub password_hash: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

/// Transactional email configuration (Resend HTTP API).
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// API key. `None` disables outbound email.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the email API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sender, e.g. `Career Capital <onboarding@resend.dev>`.
    #[serde(default = "default_from")]
    pub from: String,

    /// Recipients of submission notifications.
    #[serde(default)]
    pub to: Vec<String>,

    /// HTTP timeout for a single send.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            from: default_from(),
            to: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from() -> String {
    "Career Capital <onboarding@resend.dev>".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Public testimonial view and tag catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TestimonialsConfig {
    /// Number of testimonials per "load more" page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Tags shown as engagement types (filterable facets).
    #[serde(default = "default_engagement_types")]
    pub engagement_types: Vec<String>,

    /// Suggested topical tags offered in the admin console.
    #[serde(default = "default_other_tags")]
    pub other_tags: Vec<String>,
}

impl Default for TestimonialsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            engagement_types: default_engagement_types(),
            other_tags: default_other_tags(),
        }
    }
}

fn default_page_size() -> usize {
    8
}

fn default_engagement_types() -> Vec<String> {
    [
        "Keynote Speaking",
        "Workshop Facilitation",
        "Executive Coaching",
        "Strategy & Roadmap",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_other_tags() -> Vec<String> {
    [
        "AI Fluency",
        "Social Wealth",
        "Leadership Development",
        "Relationship Management",
        "Organizational Change",
        "Career Capital",
        "Mindset Shift",
        "AI Readiness",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
