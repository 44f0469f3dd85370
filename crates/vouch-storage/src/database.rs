// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: migrations, PRAGMA setup, and lifecycle.
//!
//! All reads and writes go through one `tokio_rusqlite::Connection`, which
//! runs every closure on a single background thread. That thread IS the single
//! writer. Do NOT open additional connections for writes.

use std::path::Path;

use tracing::debug;
use vouch_core::VouchError;

/// Handle to the serialized SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` in WAL mode.
    pub async fn open(path: &str) -> Result<Self, VouchError> {
        Self::open_with(path, true).await
    }

    /// Open the database, run pending migrations, and apply PRAGMAs.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, VouchError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }

        // Migrations run on a short-lived blocking connection before the
        // serialized connection is opened.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), VouchError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(storage_err)?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| VouchError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(storage_err)?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA synchronous = NORMAL;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The serialized connection used by the query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), VouchError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Close the connection, consuming the handle.
    pub async fn close(self) -> Result<(), VouchError> {
        self.conn.close().await.map_err(storage_err)
    }
}

/// Map a tokio-rusqlite error into a repository error.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> VouchError {
    VouchError::Repository {
        source: Box::new(e),
    }
}

pub(crate) fn storage_err<E>(e: E) -> VouchError
where
    E: std::error::Error + Send + Sync + 'static,
{
    VouchError::Repository {
        source: Box::new(e),
    }
}

/// Current UTC time in the same format SQLite's `strftime` defaults produce.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
