// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DataStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use zapcast_config::model::StorageConfig;
use zapcast_core::types::{
    Brand, Contact, ContactList, MessageId, MessageStatus, OutboundMessage, Session, SessionStats,
    SessionStatus, StaticVariable, TemplateReference, VariableMapping,
};
use zapcast_core::{AdapterType, DataStore, HealthStatus, PluginAdapter, ZapcastError};

use crate::database::Database;
use crate::queries;

/// Outcome of a contact import, including rows dropped by the prefilter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub contact_list_id: String,
    pub imported: usize,
    pub skipped: usize,
}

/// SQLite-backed data store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, ZapcastError> {
        self.db.get().ok_or_else(|| ZapcastError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), ZapcastError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ZapcastError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), ZapcastError> {
        self.db()?.close().await
    }

    // --- Campaign setup operations ---

    pub async fn create_session(&self, session: &Session) -> Result<(), ZapcastError> {
        queries::sessions::create_session(self.db()?, session).await
    }

    pub async fn create_brand(&self, brand: &Brand) -> Result<(), ZapcastError> {
        queries::catalog::create_brand(self.db()?, brand).await
    }

    pub async fn create_template_reference(
        &self,
        template: &TemplateReference,
    ) -> Result<(), ZapcastError> {
        queries::catalog::create_template_reference(self.db()?, template).await
    }

    pub async fn add_variable_mapping(
        &self,
        mapping: &VariableMapping,
    ) -> Result<(), ZapcastError> {
        queries::catalog::add_variable_mapping(self.db()?, mapping).await
    }

    pub async fn set_static_variable(&self, var: &StaticVariable) -> Result<(), ZapcastError> {
        queries::catalog::upsert_static_variable(self.db()?, var).await
    }

    /// Import raw contact rows into a new contact list for `session_id`.
    ///
    /// Rows whose phone field carries fewer than [`zapcast_core::phone::MIN_DIGITS`]
    /// digits are dropped here rather than stored, so obviously broken rows
    /// never reach dispatch. Full normalization still happens per contact at
    /// dispatch time.
    pub async fn import_contacts(
        &self,
        session_id: &str,
        list_name: &str,
        rows: Vec<(String, serde_json::Map<String, serde_json::Value>)>,
    ) -> Result<ImportReport, ZapcastError> {
        let db = self.db()?;
        let list = ContactList {
            id: uuid::Uuid::new_v4().to_string(),
            name: list_name.to_string(),
            session_id: session_id.to_string(),
        };
        queries::contacts::create_contact_list(db, &list).await?;

        let total = rows.len();
        let contacts: Vec<Contact> = rows
            .into_iter()
            .filter(|(phone, _)| {
                phone.chars().filter(char::is_ascii_digit).count()
                    >= zapcast_core::phone::MIN_DIGITS
            })
            .map(|(phone, raw_data)| Contact {
                id: uuid::Uuid::new_v4().to_string(),
                contact_list_id: list.id.clone(),
                phone,
                raw_data,
            })
            .collect();
        let imported = contacts.len();
        queries::contacts::insert_contacts(db, &contacts).await?;
        debug!(
            session_id,
            imported,
            skipped = total - imported,
            "contact import complete"
        );
        Ok(ImportReport {
            contact_list_id: list.id,
            imported,
            skipped: total - imported,
        })
    }

    // --- Reporting operations ---

    pub async fn get_messages(&self, session_id: &str) -> Result<Vec<OutboundMessage>, ZapcastError> {
        queries::messages::get_messages_for_session(self.db()?, session_id).await
    }

    pub async fn session_stats(&self, session_id: &str) -> Result<SessionStats, ZapcastError> {
        queries::sessions::session_stats(self.db()?, session_id).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, ZapcastError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), tokio_rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZapcastError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn find_contacts_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<Contact>, ZapcastError> {
        queries::contacts::find_contacts_by_session(self.db()?, session_id).await
    }

    async fn get_contact(&self, contact_id: &str) -> Result<Option<Contact>, ZapcastError> {
        queries::contacts::get_contact(self.db()?, contact_id).await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ZapcastError> {
        queries::sessions::get_session(self.db()?, session_id).await
    }

    async fn get_brand(&self, brand_id: &str) -> Result<Option<Brand>, ZapcastError> {
        queries::catalog::get_brand(self.db()?, brand_id).await
    }

    async fn get_template_reference(
        &self,
        template_id: &str,
    ) -> Result<Option<TemplateReference>, ZapcastError> {
        queries::catalog::get_template_reference(self.db()?, template_id).await
    }

    async fn get_variable_mappings(
        &self,
        session_id: &str,
    ) -> Result<Vec<VariableMapping>, ZapcastError> {
        queries::catalog::get_variable_mappings(self.db()?, session_id).await
    }

    async fn get_static_variables(
        &self,
        session_id: &str,
    ) -> Result<Vec<StaticVariable>, ZapcastError> {
        queries::catalog::get_static_variables(self.db()?, session_id).await
    }

    async fn create_message(
        &self,
        session_id: &str,
        contact_id: &str,
        status: MessageStatus,
        error: Option<&str>,
    ) -> Result<MessageId, ZapcastError> {
        queries::messages::create_message(self.db()?, session_id, contact_id, status, error).await
    }

    async fn update_message(
        &self,
        message_id: &MessageId,
        status: MessageStatus,
        provider_sid: Option<&str>,
        error: Option<&str>,
    ) -> Result<(), ZapcastError> {
        queries::messages::update_message(self.db()?, message_id, status, provider_sid, error).await
    }

    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<(), ZapcastError> {
        queries::sessions::update_session_status(self.db()?, session_id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn make_session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            name: "campaign".to_string(),
            status: SessionStatus::Draft,
            brand_id: "brand-1".to_string(),
            template_id: "tmpl-1".to_string(),
            created_by: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn sqlite_store_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn import_prefilters_rows_with_too_few_digits() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("import.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        store.create_session(&make_session("sess-1")).await.unwrap();

        let rows = vec![
            ("(11) 91234-5678".to_string(), serde_json::Map::new()),
            ("123".to_string(), serde_json::Map::new()),
            ("".to_string(), serde_json::Map::new()),
        ];
        let report = store.import_contacts("sess-1", "august", rows).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 2);

        let contacts = store.find_contacts_by_session("sess-1").await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone, "(11) 91234-5678");

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_dispatch_read_path_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        store
            .create_brand(&Brand {
                id: "brand-1".to_string(),
                name: "Acme".to_string(),
                prefix: Some("whatsapp".to_string()),
                from_number: "+14155238886".to_string(),
            })
            .await
            .unwrap();
        store
            .create_template_reference(&TemplateReference {
                id: "tmpl-1".to_string(),
                provider_template_id: "HX0123".to_string(),
                name: "welcome".to_string(),
                has_variables: true,
            })
            .await
            .unwrap();
        store.create_session(&make_session("sess-1")).await.unwrap();
        store
            .add_variable_mapping(&VariableMapping {
                session_id: "sess-1".to_string(),
                variable: "1".to_string(),
                column_key: "name".to_string(),
            })
            .await
            .unwrap();
        store
            .set_static_variable(&StaticVariable {
                session_id: "sess-1".to_string(),
                variable: "2".to_string(),
                value: "10% off".to_string(),
            })
            .await
            .unwrap();

        let session = store.get_session("sess-1").await.unwrap().unwrap();
        let brand = store.get_brand(&session.brand_id).await.unwrap().unwrap();
        let template = store
            .get_template_reference(&session.template_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(brand.sender(), "whatsapp:+14155238886");
        assert_eq!(template.provider_template_id, "HX0123");
        assert_eq!(store.get_variable_mappings("sess-1").await.unwrap().len(), 1);
        assert_eq!(store.get_static_variables("sess-1").await.unwrap().len(), 1);

        // Message row lifecycle and stats.
        let id = store
            .create_message("sess-1", "c-1", MessageStatus::Pending, None)
            .await
            .unwrap();
        store
            .update_message(&id, MessageStatus::Sent, Some("SM1"), None)
            .await
            .unwrap();
        let stats = store.session_stats("sess-1").await.unwrap();
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.total, 1);

        store
            .update_session_status("sess-1", SessionStatus::Completed)
            .await
            .unwrap();
        let done = store.get_session("sess-1").await.unwrap().unwrap();
        assert_eq!(done.status, SessionStatus::Completed);

        store.close().await.unwrap();
    }
}
