// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage lifecycle trait for persistence backends.

use async_trait::async_trait;

use crate::error::VouchError;
use crate::traits::adapter::PluginAdapter;

/// Lifecycle of a durable store: open, migrate, flush, close.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, pragmas).
    async fn initialize(&self) -> Result<(), VouchError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), VouchError>;
}
