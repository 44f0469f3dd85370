// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage and repository traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use vouch_config::model::StorageConfig;
use vouch_core::types::{
    ContactStatus, ContactSubmission, NewContactSubmission, NewTestimonial, PositionChange,
    Testimonial, TestimonialFilter, TestimonialPatch,
};
use vouch_core::{
    AdapterType, ContactRepository, HealthStatus, PluginAdapter, StorageAdapter,
    TestimonialRepository, VouchError,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened lazily by [`StorageAdapter::initialize`]; every
/// repository call before that fails with a repository error.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Construct and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, VouchError> {
        let storage = Self::new(config);
        storage.initialize().await?;
        Ok(storage)
    }

    fn db(&self) -> Result<&Database, VouchError> {
        self.db.get().ok_or_else(|| VouchError::Repository {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, VouchError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VouchError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), VouchError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VouchError::Repository {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), VouchError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl TestimonialRepository for SqliteStorage {
    async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>, VouchError> {
        queries::testimonials::get_testimonial(self.db()?, id).await
    }

    async fn list_testimonials(
        &self,
        filter: TestimonialFilter,
    ) -> Result<Vec<Testimonial>, VouchError> {
        queries::testimonials::list_testimonials(self.db()?, filter).await
    }

    async fn append_testimonial(&self, input: &NewTestimonial) -> Result<Testimonial, VouchError> {
        queries::testimonials::append_testimonial(self.db()?, &new_id(), input).await
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: &TestimonialPatch,
    ) -> Result<Option<Testimonial>, VouchError> {
        queries::testimonials::update_testimonial(self.db()?, id, patch).await
    }

    async fn delete_testimonial(&self, id: &str) -> Result<bool, VouchError> {
        queries::testimonials::delete_testimonial(self.db()?, id).await
    }

    async fn count_featured(&self, excluding: Option<&str>) -> Result<usize, VouchError> {
        queries::testimonials::count_featured(self.db()?, excluding).await
    }

    async fn apply_positions(&self, changes: &[PositionChange]) -> Result<(), VouchError> {
        queries::testimonials::apply_positions(self.db()?, changes).await
    }
}

#[async_trait]
impl ContactRepository for SqliteStorage {
    async fn insert_contact(
        &self,
        form: &NewContactSubmission,
    ) -> Result<ContactSubmission, VouchError> {
        queries::contacts::insert_contact(self.db()?, &new_id(), form).await
    }

    async fn get_contact(&self, id: &str) -> Result<Option<ContactSubmission>, VouchError> {
        queries::contacts::get_contact(self.db()?, id).await
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactSubmission>, VouchError> {
        queries::contacts::list_contacts(self.db()?, status).await
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, VouchError> {
        queries::contacts::update_contact_status(self.db()?, id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("adapter.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn calls_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config(&dir));
        let err = storage
            .list_testimonials(TestimonialFilter::all())
            .await
            .unwrap_err();
        assert!(matches!(err, VouchError::Repository { .. }));
    }

    #[tokio::test]
    async fn double_initialize_fails() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(config(&dir)).await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_and_shutdown() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(config(&dir)).await.unwrap();
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn append_generates_uuid_ids() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(config(&dir)).await.unwrap();
        let input = NewTestimonial {
            quote: "Sharp".into(),
            author: "Lin".into(),
            company: "Acme".into(),
            is_active: true,
            featured: false,
            tags: vec![],
            testimonial_type: Default::default(),
        };
        let a = storage.append_testimonial(&input).await.unwrap();
        let b = storage.append_testimonial(&input).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
    }
}
