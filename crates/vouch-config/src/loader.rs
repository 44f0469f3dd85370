// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based loader for layered configuration.
//!
//! Lookup order: `./vouch.toml` > `~/.config/vouch/vouch.toml` > `/etc/vouch/vouch.toml`,
//! with `VOUCH_` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VouchConfig;

/// System-wide config path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/vouch/vouch.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "vouch.toml";

/// The XDG user config path, if a config dir exists on this platform.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vouch").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vouch/vouch.toml`
/// 3. `~/.config/vouch/vouch.toml`
/// 4. `./vouch.toml`
/// 5. `VOUCH_*` environment variables
pub fn load_config() -> Result<VouchConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VouchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VouchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VouchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VouchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the hierarchical Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VouchConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// `Env::split("_")` would turn `VOUCH_STORAGE_DATABASE_PATH` into
/// `storage.database.path`; only the first underscore after the section name
/// is a separator.
fn env_provider() -> Env {
    Env::prefixed("VOUCH_").map(|key| map_env_key(key.as_str()).into())
}

const SECTIONS: &[&str] = &[
    "site",
    "storage",
    "gateway",
    "auth",
    "notifier",
    "testimonials",
];

/// Maps a prefix-stripped env key to a dotted figment path.
///
/// The key may arrive in either case; the result is always lowercase.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
