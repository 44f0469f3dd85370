// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations using refinery.
//!
//! SQL files under `migrations/` are compiled in via `embed_migrations!`.

use vouch_core::VouchError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied versions in `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), VouchError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| VouchError::Repository {
            source: Box::new(e),
        })?;
    Ok(())
}
