// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission CRUD operations.

use geopin_core::GeopinError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{NewSubmission, SubmissionPreview};

/// Insert a new submission. Returns the auto-generated row ID.
///
/// `created_at` is assigned by the database so ordering is consistent
/// regardless of caller clocks.
pub async fn insert_submission(db: &Database, new: &NewSubmission) -> Result<i64, GeopinError> {
    let new = new.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO submissions (user_id, media_ref, lat, lon, address, archive_ref)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.user_id.0,
                    new.media_ref.0,
                    new.lat,
                    new.lon,
                    new.address,
                    new.archive_ref,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The newest submissions, most recent first. `id` breaks ties between rows
/// inserted within the same timestamp granularity.
pub async fn recent_submissions(
    db: &Database,
    limit: i64,
) -> Result<Vec<SubmissionPreview>, GeopinError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT media_ref, address FROM submissions
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(SubmissionPreview {
                    media_ref: geopin_core::types::MediaRef(row.get(0)?),
                    address: row.get(1)?,
                })
            })?;
            let mut previews = Vec::new();
            for row in rows {
                previews.push(row?);
            }
            Ok(previews)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Case-insensitive substring search over stored addresses, newest first.
///
/// `LOWER` in stock SQLite folds ASCII only; non-ASCII addresses match
/// case-sensitively, same as SQLite's own `LIKE`.
pub async fn search_submissions(
    db: &Database,
    needle: &str,
) -> Result<Vec<SubmissionPreview>, GeopinError> {
    let pattern = format!("%{}%", needle.to_lowercase());
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT media_ref, address FROM submissions
                 WHERE LOWER(address) LIKE ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![pattern], |row| {
                Ok(SubmissionPreview {
                    media_ref: geopin_core::types::MediaRef(row.get(0)?),
                    address: row.get(1)?,
                })
            })?;
            let mut previews = Vec::new();
            for row in rows {
                previews.push(row?);
            }
            Ok(previews)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
