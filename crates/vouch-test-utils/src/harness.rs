// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` opens a real SQLite database in a temporary directory and
//! pairs it with a [`MockNotifier`], so tests can drive the services against
//! the production repository.

use std::sync::Arc;

use vouch_config::model::{StorageConfig, VouchConfig};
use vouch_core::{StorageAdapter, VouchError};
use vouch_storage::SqliteStorage;

use crate::mock_notifier::MockNotifier;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: VouchConfig,
    failing_notifier: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: VouchConfig::default(),
            failing_notifier: false,
        }
    }

    /// Start from a custom configuration. The storage path is still replaced.
    pub fn with_config(mut self, config: VouchConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a notifier that fails every call.
    pub fn with_failing_notifier(mut self) -> Self {
        self.failing_notifier = true;
        self
    }

    /// Create the temp database and assemble the harness.
    pub async fn build(self) -> Result<TestHarness, VouchError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| VouchError::Repository { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;

        let notifier = if self.failing_notifier {
            MockNotifier::failing()
        } else {
            MockNotifier::new()
        };

        tracing::debug!(path = %config.storage.database_path, "test harness ready");

        Ok(TestHarness {
            storage: Arc::new(storage),
            notifier,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A real SQLite repository plus a recording notifier.
///
/// The temporary directory lives as long as the harness.
pub struct TestHarness {
    pub storage: Arc<SqliteStorage>,
    pub notifier: MockNotifier,
    pub config: VouchConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default configuration.
    pub async fn new() -> Result<Self, VouchError> {
        Self::builder().build().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::TestimonialRepository;
    use vouch_core::types::TestimonialFilter;

    #[tokio::test]
    async fn harness_opens_empty_database() {
        let harness = TestHarness::new().await.unwrap();
        let rows = harness
            .storage
            .list_testimonials(TestimonialFilter::all())
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert!(harness.config.storage.database_path.ends_with("test.db"));
    }

    #[tokio::test]
    async fn failing_notifier_option_is_honoured() {
        use vouch_core::Notifier;
        use vouch_core::types::{ContactStatus, ContactSubmission};

        let harness = TestHarness::builder()
            .with_failing_notifier()
            .build()
            .await
            .unwrap();
        let submission = ContactSubmission {
            id: "c1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            organization: None,
            inquiry_type: "Other".into(),
            message: "Hi".into(),
            status: ContactStatus::New,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(harness.notifier.notify(&submission).await.is_err());
        assert_eq!(harness.notifier.call_count().await, 1);
    }
}
