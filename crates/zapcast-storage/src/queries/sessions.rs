// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session CRUD and status reporting.

use rusqlite::params;
use zapcast_core::ZapcastError;
use zapcast_core::types::SessionStatus;

use crate::database::Database;
use crate::models::{self, Session, SessionStats};

/// Create a new session.
pub async fn create_session(db: &Database, session: &Session) -> Result<(), ZapcastError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, name, status, brand_id, template_id, created_by, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    session.id,
                    session.name,
                    session.status.to_string(),
                    session.brand_id,
                    session.template_id,
                    session.created_by,
                    session.created_at,
                    session.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a session by ID.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<Session>, ZapcastError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, status, brand_id, template_id, created_by, created_at, updated_at
                 FROM sessions WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Session {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    status: models::decode_enum(2, row.get(2)?)?,
                    brand_id: row.get(3)?,
                    template_id: row.get(4)?,
                    created_by: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            });
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a session's status and updated_at timestamp.
pub async fn update_session_status(
    db: &Database,
    id: &str,
    status: SessionStatus,
) -> Result<(), ZapcastError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sessions SET status = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Message status counts for one session (dashboard/reporting surface).
pub async fn session_stats(db: &Database, session_id: &str) -> Result<SessionStats, ZapcastError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT status, COUNT(*) FROM outbound_messages
                 WHERE session_id = ?1 GROUP BY status",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;

            let mut stats = SessionStats::default();
            for row in rows {
                let (status, count) = row?;
                match status.as_str() {
                    "SENT" => stats.sent += count,
                    "FAILED" => stats.failed += count,
                    "PENDING" => stats.pending += count,
                    _ => {}
                }
                stats.total += count;
            }
            Ok(stats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
