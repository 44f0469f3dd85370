// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact submission persistence.

use rusqlite::types::Type;
use rusqlite::{OptionalExtension, params};
use vouch_core::VouchError;
use vouch_core::types::{ContactStatus, ContactSubmission, NewContactSubmission};

use crate::database::{Database, NOW_SQL, map_tr_err};

const COLUMNS: &str =
    "id, name, email, organization, inquiry_type, message, status, created_at, updated_at";

fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContactSubmission> {
    let status: String = row.get(6)?;
    let status: ContactStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(ContactSubmission {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        organization: row.get(3)?,
        inquiry_type: row.get(4)?,
        message: row.get(5)?,
        status,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn select_by_id(
    conn: &rusqlite::Connection,
    id: &str,
) -> rusqlite::Result<Option<ContactSubmission>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = ?1"),
        params![id],
        row_to_contact,
    )
    .optional()
}

/// Insert a submission with status `new`.
pub async fn insert_contact(
    db: &Database,
    id: &str,
    form: &NewContactSubmission,
) -> Result<ContactSubmission, VouchError> {
    let id = id.to_string();
    let form = form.clone();
    db.connection()
        .call(move |conn| -> Result<ContactSubmission, rusqlite::Error> {
            conn.execute(
                "INSERT INTO contact_submissions (id, name, email, organization, inquiry_type, message, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    form.name,
                    form.email,
                    form.organization,
                    form.inquiry_type,
                    form.message,
                    ContactStatus::New.to_string(),
                ],
            )?;
            select_by_id(conn, &id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a submission by ID.
pub async fn get_contact(db: &Database, id: &str) -> Result<Option<ContactSubmission>, VouchError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ContactSubmission>, rusqlite::Error> {
            select_by_id(conn, &id)
        })
        .await
        .map_err(map_tr_err)
}

/// List submissions newest first, optionally filtered by status.
pub async fn list_contacts(
    db: &Database,
    status: Option<ContactStatus>,
) -> Result<Vec<ContactSubmission>, VouchError> {
    let status = status.map(|s| s.to_string());
    db.connection()
        .call(move |conn| -> Result<Vec<ContactSubmission>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM contact_submissions
                 WHERE (?1 IS NULL OR status = ?1)
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![status], row_to_contact)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Move a submission to a new triage status.
pub async fn update_contact_status(
    db: &Database,
    id: &str,
    status: ContactStatus,
) -> Result<Option<ContactSubmission>, VouchError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ContactSubmission>, rusqlite::Error> {
            let n = conn.execute(
                &format!(
                    "UPDATE contact_submissions SET status = ?1, updated_at = {NOW_SQL} WHERE id = ?2"
                ),
                params![status.to_string(), id],
            )?;
            if n == 0 {
                return Ok(None);
            }
            select_by_id(conn, &id)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn form(name: &str) -> NewContactSubmission {
        NewContactSubmission {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            organization: None,
            inquiry_type: "Keynote Speaking".to_string(),
            message: "Are you available in May?".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_sets_status_new() {
        let (db, _dir) = test_db().await;
        let saved = insert_contact(&db, "c1", &form("Ada")).await.unwrap();
        assert_eq!(saved.status, ContactStatus::New);
        assert_eq!(saved.email, "ada@example.com");
        assert!(saved.organization.is_none());

        let fetched = get_contact(&db, "c1").await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let (db, _dir) = test_db().await;
        insert_contact(&db, "c1", &form("Ada")).await.unwrap();
        insert_contact(&db, "c2", &form("Grace")).await.unwrap();
        update_contact_status(&db, "c1", ContactStatus::Read)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(list_contacts(&db, None).await.unwrap().len(), 2);
        let unread = list_contacts(&db, Some(ContactStatus::New)).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, "c2");
    }

    #[tokio::test]
    async fn status_update_on_missing_id_returns_none() {
        let (db, _dir) = test_db().await;
        let result = update_contact_status(&db, "ghost", ContactStatus::Archived)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
