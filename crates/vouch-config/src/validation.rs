// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::VouchConfig;

/// Shortest admin session the server will accept.
const MIN_SESSION_TTL_SECS: u64 = 60;

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &VouchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("gateway.host must not be empty"));
    } else {
        let is_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_ip && !is_hostname {
            errors.push(ConfigError::validation(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.testimonials.page_size == 0 {
        errors.push(ConfigError::validation(
            "testimonials.page_size must be at least 1",
        ));
    }

    if config.auth.session_ttl_secs < MIN_SESSION_TTL_SECS {
        errors.push(ConfigError::validation(format!(
            "auth.session_ttl_secs must be at least {MIN_SESSION_TTL_SECS}, got {}",
            config.auth.session_ttl_secs
        )));
    }

    let mut seen = HashSet::new();
    for (i, admin) in config.auth.admins.iter().enumerate() {
        let email = admin.email.trim().to_lowercase();
        if email.is_empty() {
            errors.push(ConfigError::validation(format!(
                "auth.admins[{i}].email must not be empty"
            )));
        } else if !seen.insert(email) {
            errors.push(ConfigError::validation(format!(
                "duplicate admin email `{}` in [[auth.admins]]",
                admin.email
            )));
        }
        if !admin.password_hash.starts_with("$argon2") {
            errors.push(ConfigError::validation(format!(
                "auth.admins[{i}].password_hash is not an argon2 PHC string \
                 (generate one with `vouch hash-password`)"
            )));
        }
    }

    if config.notifier.api_key.is_some() && config.notifier.to.is_empty() {
        errors.push(ConfigError::validation(
            "notifier.to must list at least one recipient when notifier.api_key is set",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AdminAccount;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    fn admin(email: &str) -> AdminAccount {
        AdminAccount {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&VouchConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails() {
        let mut config = VouchConfig::default();
        config.storage.database_path = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn zero_page_size_fails() {
        let mut config = VouchConfig::default();
        config.testimonials.page_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "page_size"));
    }

    #[test]
    fn short_session_ttl_fails() {
        let mut config = VouchConfig::default();
        config.auth.session_ttl_secs = 5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "session_ttl_secs"));
    }

    #[test]
    fn duplicate_admin_emails_fail_case_insensitively() {
        let mut config = VouchConfig::default();
        config.auth.admins = vec![admin("ed@example.com"), admin("ED@example.com")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate admin email"));
    }

    #[test]
    fn plaintext_password_fails() {
        let mut config = VouchConfig::default();
        let mut account = admin("ed@example.com");
        account.password_hash = "hunter2".to_string();
        config.auth.admins = vec![account];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "password_hash"));
    }

    #[test]
    fn api_key_without_recipients_fails() {
        let mut config = VouchConfig::default();
        config.notifier.api_key = Some("re_123".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "notifier.to"));
    }

    #[test]
    fn collects_all_errors_at_once() {
        let mut config = VouchConfig::default();
        config.gateway.host = "".to_string();
        config.storage.database_path = "".to_string();
        config.testimonials.page_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = VouchConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.storage.database_path = "/tmp/vouch.db".to_string();
        config.auth.admins = vec![admin("ed@example.com")];
        config.notifier.api_key = Some("re_123".to_string());
        config.notifier.to = vec!["owner@example.com".to_string()];
        assert!(validate_config(&config).is_ok());
    }
}
