// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Query modules accept `&Database` and call through `conn.call()`;
//! do not create additional Connection instances for writes.

use tokio_rusqlite::Connection;
use tracing::debug;

use zapcast_core::ZapcastError;

/// A single SQLite connection with migrations applied.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled.
    pub async fn open(path: &str) -> Result<Self, ZapcastError> {
        Self::open_with_options(path, true).await
    }

    /// Open the database with explicit journal mode control.
    ///
    /// Runs PRAGMA setup and all pending migrations before returning.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, ZapcastError> {
        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            crate::migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), ZapcastError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the crate-level storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> ZapcastError {
    ZapcastError::Storage {
        source: Box::new(e),
    }
}
