// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Testimonial CRUD and batched position writes.

use rusqlite::types::Type;
use rusqlite::{OptionalExtension, params, params_from_iter};
use vouch_core::VouchError;
use vouch_core::types::{
    NewTestimonial, PositionChange, Testimonial, TestimonialFilter, TestimonialPatch,
    TestimonialType,
};

use crate::database::{Database, NOW_SQL, map_tr_err, storage_err};

const COLUMNS: &str = "id, quote, author, company, position, is_active, featured, tags, \
                       testimonial_type, created_at, updated_at";

const ORDER_BY: &str = "ORDER BY position ASC, created_at ASC, id ASC";

fn conversion_err<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn row_to_testimonial(row: &rusqlite::Row<'_>) -> rusqlite::Result<Testimonial> {
    let tags_json: String = row.get(7)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| conversion_err(7, e))?;
    let type_str: String = row.get(8)?;
    let testimonial_type: TestimonialType =
        type_str.parse().map_err(|e| conversion_err(8, e))?;

    Ok(Testimonial {
        id: row.get(0)?,
        quote: row.get(1)?,
        author: row.get(2)?,
        company: row.get(3)?,
        position: row.get(4)?,
        is_active: row.get(5)?,
        featured: row.get(6)?,
        tags,
        testimonial_type,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn select_by_id(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<Option<Testimonial>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM testimonials WHERE id = ?1"),
        params![id],
        row_to_testimonial,
    )
    .optional()
}

/// Get a testimonial by ID.
pub async fn get_testimonial(db: &Database, id: &str) -> Result<Option<Testimonial>, VouchError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Testimonial>, rusqlite::Error> {
            select_by_id(conn, &id)
        })
        .await
        .map_err(map_tr_err)
}

/// List testimonials matching `filter` in display order.
pub async fn list_testimonials(
    db: &Database,
    filter: TestimonialFilter,
) -> Result<Vec<Testimonial>, VouchError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Testimonial>, rusqlite::Error> {
            let mut sql = format!("SELECT {COLUMNS} FROM testimonials WHERE 1 = 1");
            let mut args: Vec<bool> = Vec::new();
            if let Some(active) = filter.active {
                sql.push_str(" AND is_active = ?");
                args.push(active);
            }
            if let Some(featured) = filter.featured {
                sql.push_str(" AND featured = ?");
                args.push(featured);
            }
            sql.push(' ');
            sql.push_str(ORDER_BY);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args), row_to_testimonial)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a testimonial at the end of the ordering.
///
/// The next position is read and the row inserted inside one transaction,
/// so concurrent appends cannot pick the same value.
pub async fn append_testimonial(
    db: &Database,
    id: &str,
    input: &NewTestimonial,
) -> Result<Testimonial, VouchError> {
    let id = id.to_string();
    let input = input.clone();
    let tags_json = serde_json::to_string(&input.tags).map_err(storage_err)?;

    db.connection()
        .call(move |conn| -> Result<Testimonial, rusqlite::Error> {
            let tx = conn.transaction()?;
            let next: i64 = tx.query_row(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM testimonials",
                [],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT INTO testimonials
                     (id, quote, author, company, position, is_active, featured, tags, testimonial_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    input.quote,
                    input.author,
                    input.company,
                    next,
                    input.is_active,
                    input.featured,
                    tags_json,
                    input.testimonial_type.to_string(),
                ],
            )?;
            let row = select_by_id(&tx, &id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            tx.commit()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a patch to every non-position field. Returns `None` for an unknown id.
pub async fn update_testimonial(
    db: &Database,
    id: &str,
    patch: &TestimonialPatch,
) -> Result<Option<Testimonial>, VouchError> {
    let id = id.to_string();
    let patch = patch.clone();

    db.connection()
        .call(move |conn| -> Result<Option<Testimonial>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let Some(mut current) = select_by_id(&tx, &id)? else {
                return Ok(None);
            };
            patch.apply_to(&mut current);
            let tags_json =
                serde_json::to_string(&current.tags).map_err(|e| conversion_err(7, e))?;

            tx.execute(
                &format!(
                    "UPDATE testimonials
                     SET quote = ?1, author = ?2, company = ?3, is_active = ?4, featured = ?5,
                         tags = ?6, testimonial_type = ?7, updated_at = {NOW_SQL}
                     WHERE id = ?8"
                ),
                params![
                    current.quote,
                    current.author,
                    current.company,
                    current.is_active,
                    current.featured,
                    tags_json,
                    current.testimonial_type.to_string(),
                    id,
                ],
            )?;
            let updated = select_by_id(&tx, &id)?;
            tx.commit()?;
            Ok(updated)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a testimonial. Returns `false` if no row matched.
pub async fn delete_testimonial(db: &Database, id: &str) -> Result<bool, VouchError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let n = conn.execute("DELETE FROM testimonials WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Count featured testimonials, optionally ignoring one id.
pub async fn count_featured(db: &Database, excluding: Option<&str>) -> Result<usize, VouchError> {
    let excluding = excluding.map(str::to_string);
    let count = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM testimonials
                 WHERE featured = 1 AND (?1 IS NULL OR id != ?1)",
                params![excluding],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Write a batch of positions in one transaction.
///
/// If any id does not exist the transaction is rolled back and `NotFound`
/// is returned, leaving every row untouched.
pub async fn apply_positions(db: &Database, changes: &[PositionChange]) -> Result<(), VouchError> {
    if changes.is_empty() {
        return Ok(());
    }
    let changes = changes.to_vec();

    let outcome = db
        .connection()
        .call(move |conn| -> Result<Result<(), String>, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "UPDATE testimonials SET position = ?1, updated_at = {NOW_SQL} WHERE id = ?2"
                ))?;
                for change in &changes {
                    if stmt.execute(params![change.position, change.id])? == 0 {
                        // Dropping `tx` without commit rolls back.
                        return Ok(Err(change.id.clone()));
                    }
                }
            }
            tx.commit()?;
            Ok(Ok(()))
        })
        .await
        .map_err(map_tr_err)?;

    outcome.map_err(|id| VouchError::not_found("testimonial", id))
}
