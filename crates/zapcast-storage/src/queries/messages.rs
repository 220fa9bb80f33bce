// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message row queries.
//!
//! One row per dispatch attempt. Rows are created PENDING (or FAILED when
//! the phone never passed normalization) and transitioned exactly once to
//! SENT or FAILED by the dispatcher.

use rusqlite::params;
use zapcast_core::ZapcastError;
use zapcast_core::types::{MessageId, MessageStatus};

use crate::database::Database;
use crate::models::{self, OutboundMessage};

/// Create an outbound message row with a fresh UUID, returning its ID.
pub async fn create_message(
    db: &Database,
    session_id: &str,
    contact_id: &str,
    status: MessageStatus,
    error: Option<&str>,
) -> Result<MessageId, ZapcastError> {
    let id = uuid::Uuid::new_v4().to_string();
    let row_id = id.clone();
    let session_id = session_id.to_string();
    let contact_id = contact_id.to_string();
    let error = error.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO outbound_messages (id, session_id, contact_id, status, error)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row_id, session_id, contact_id, status.to_string(), error],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(MessageId(id))
}

/// Transition a message row to its outcome status.
pub async fn update_message(
    db: &Database,
    message_id: &MessageId,
    status: MessageStatus,
    provider_sid: Option<&str>,
    error: Option<&str>,
) -> Result<(), ZapcastError> {
    let id = message_id.0.clone();
    let provider_sid = provider_sid.map(str::to_string);
    let error = error.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE outbound_messages
                 SET status = ?1, provider_sid = ?2, error = ?3,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?4",
                params![status.to_string(), provider_sid, error, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All message rows for a session in creation order (reporting/export surface).
pub async fn get_messages_for_session(
    db: &Database,
    session_id: &str,
) -> Result<Vec<OutboundMessage>, ZapcastError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, contact_id, status, provider_sid, error,
                        created_at, updated_at
                 FROM outbound_messages
                 WHERE session_id = ?1
                 ORDER BY created_at ASC, rowid ASC",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok(OutboundMessage {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    contact_id: row.get(2)?,
                    status: models::decode_enum(3, row.get(3)?)?,
                    provider_sid: row.get(4)?,
                    error: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, SessionStatus};
    use crate::queries::sessions;
    use tempfile::tempdir;

    async fn setup_with_session(session_id: &str) -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        sessions::create_session(
            &db,
            &Session {
                id: session_id.to_string(),
                name: "test".to_string(),
                status: SessionStatus::Running,
                brand_id: "brand-1".to_string(),
                template_id: "tmpl-1".to_string(),
                created_by: None,
                created_at: "2026-01-01T00:00:00.000Z".to_string(),
                updated_at: "2026-01-01T00:00:00.000Z".to_string(),
            },
        )
        .await
        .unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn pending_then_sent_lifecycle() {
        let (db, _dir) = setup_with_session("sess-1").await;

        let id = create_message(&db, "sess-1", "c-1", MessageStatus::Pending, None)
            .await
            .unwrap();
        update_message(&db, &id, MessageStatus::Sent, Some("SM123"), None)
            .await
            .unwrap();

        let messages = get_messages_for_session(&db, "sess-1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].status, MessageStatus::Sent);
        assert_eq!(messages[0].provider_sid, Some("SM123".to_string()));
        assert!(messages[0].error.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn failed_row_created_directly_with_error() {
        let (db, _dir) = setup_with_session("sess-1").await;

        create_message(
            &db,
            "sess-1",
            "c-bad",
            MessageStatus::Failed,
            Some("Invalid phone"),
        )
        .await
        .unwrap();

        let messages = get_messages_for_session(&db, "sess-1").await.unwrap();
        assert_eq!(messages[0].status, MessageStatus::Failed);
        assert_eq!(messages[0].error, Some("Invalid phone".to_string()));
        assert!(messages[0].provider_sid.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn stats_count_by_status() {
        let (db, _dir) = setup_with_session("sess-1").await;

        let a = create_message(&db, "sess-1", "c-1", MessageStatus::Pending, None)
            .await
            .unwrap();
        update_message(&db, &a, MessageStatus::Sent, Some("SM1"), None)
            .await
            .unwrap();
        let b = create_message(&db, "sess-1", "c-2", MessageStatus::Pending, None)
            .await
            .unwrap();
        update_message(&db, &b, MessageStatus::Failed, None, Some("boom"))
            .await
            .unwrap();
        create_message(&db, "sess-1", "c-3", MessageStatus::Pending, None)
            .await
            .unwrap();

        let stats = sessions::session_stats(&db, "sess-1").await.unwrap();
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total, 3);

        db.close().await.unwrap();
    }
}
