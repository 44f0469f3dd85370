// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner notifications for new contact submissions.

pub mod disabled;
pub mod email;
pub mod resend;

use std::sync::Arc;

use tracing::info;
use vouch_config::model::VouchConfig;
use vouch_core::{Notifier, VouchError};

pub use disabled::DisabledNotifier;
pub use resend::ResendNotifier;

/// Pick the notifier the configuration asks for.
///
/// Without an API key, submissions are stored but nobody is emailed.
pub fn notifier_from_config(config: &VouchConfig) -> Result<Arc<dyn Notifier>, VouchError> {
    match &config.notifier.api_key {
        Some(key) if !key.trim().is_empty() => {
            let notifier = ResendNotifier::new(key, &config.notifier, &config.site.name)?;
            info!(recipients = config.notifier.to.len(), "email notifications enabled");
            Ok(Arc::new(notifier))
        }
        _ => {
            info!("notifier.api_key not set; email notifications disabled");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_key_selects_disabled_notifier() {
        let config = VouchConfig::default();
        assert!(notifier_from_config(&config).is_ok());
    }

    #[test]
    fn key_selects_resend_notifier() {
        let mut config = VouchConfig::default();
        config.notifier.api_key = Some("re_test".into());
        config.notifier.to = vec!["owner@example.com".into()];
        assert!(notifier_from_config(&config).is_ok());
    }
}
