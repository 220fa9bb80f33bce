// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact list and contact queries.

use rusqlite::params;
use zapcast_core::ZapcastError;

use crate::database::Database;
use crate::models::{self, Contact, ContactList};

/// Create a contact list attached to a session.
pub async fn create_contact_list(db: &Database, list: &ContactList) -> Result<(), ZapcastError> {
    let list = list.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO contact_lists (id, name, session_id) VALUES (?1, ?2, ?3)",
                params![list.id, list.name, list.session_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a batch of contacts in a single transaction.
pub async fn insert_contacts(db: &Database, contacts: &[Contact]) -> Result<(), ZapcastError> {
    let contacts = contacts.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO contacts (id, contact_list_id, phone, raw_data)
                     VALUES (?1, ?2, ?3, ?4)",
                )?;
                for contact in &contacts {
                    let raw = serde_json::to_string(&contact.raw_data)
                        .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
                    stmt.execute(params![
                        contact.id,
                        contact.contact_list_id,
                        contact.phone,
                        raw,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All contacts belonging to a session's contact lists, in insertion order.
pub async fn find_contacts_by_session(
    db: &Database,
    session_id: &str,
) -> Result<Vec<Contact>, ZapcastError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.contact_list_id, c.phone, c.raw_data
                 FROM contacts c
                 JOIN contact_lists cl ON cl.id = c.contact_list_id
                 WHERE cl.session_id = ?1
                 ORDER BY c.rowid ASC",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok(Contact {
                    id: row.get(0)?,
                    contact_list_id: row.get(1)?,
                    phone: row.get(2)?,
                    raw_data: models::decode_json_object(3, row.get(3)?)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a single contact by ID.
pub async fn get_contact(db: &Database, id: &str) -> Result<Option<Contact>, ZapcastError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, contact_list_id, phone, raw_data FROM contacts WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Contact {
                    id: row.get(0)?,
                    contact_list_id: row.get(1)?,
                    phone: row.get(2)?,
                    raw_data: models::decode_json_object(3, row.get(3)?)?,
                })
            });
            match result {
                Ok(contact) => Ok(Some(contact)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
