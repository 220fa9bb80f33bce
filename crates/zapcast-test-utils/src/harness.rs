// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Harness for end-to-end dispatch testing.
//!
//! `DispatchHarness` assembles a temp-SQLite store seeded with a brand,
//! template, session, and contacts, plus a [`MockProvider`], so integration
//! tests can run the full pipeline without external services.

use std::sync::Arc;
use std::time::Duration;

use zapcast_config::model::StorageConfig;
use zapcast_core::types::{
    Brand, Session, SessionStatus, StaticVariable, TemplateReference, VariableMapping,
};
use zapcast_core::{DataStore, ZapcastError};
use zapcast_storage::SqliteStore;

use crate::mock_provider::MockProvider;

/// Builder for seeded dispatch test environments.
pub struct DispatchHarnessBuilder {
    contacts: Vec<(String, serde_json::Map<String, serde_json::Value>)>,
    mappings: Vec<(String, String)>,
    statics: Vec<(String, String)>,
    provider: Option<MockProvider>,
    brand_prefix: Option<String>,
}

impl DispatchHarnessBuilder {
    fn new() -> Self {
        Self {
            contacts: Vec::new(),
            mappings: Vec::new(),
            statics: Vec::new(),
            provider: None,
            brand_prefix: Some("whatsapp".to_string()),
        }
    }

    /// Add a contact with a raw phone and per-row data.
    pub fn with_contact(
        mut self,
        phone: &str,
        raw_data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.contacts.push((phone.to_string(), raw_data));
        self
    }

    /// Map a template placeholder to a contact data column.
    pub fn with_mapping(mut self, variable: &str, column_key: &str) -> Self {
        self.mappings
            .push((variable.to_string(), column_key.to_string()));
        self
    }

    /// Set a session-wide static value for a placeholder.
    pub fn with_static(mut self, variable: &str, value: &str) -> Self {
        self.statics.push((variable.to_string(), value.to_string()));
        self
    }

    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_brand_prefix(mut self, prefix: Option<&str>) -> Self {
        self.brand_prefix = prefix.map(str::to_string);
        self
    }

    /// Build the harness, seeding the store with the configured campaign.
    pub async fn build(self) -> Result<DispatchHarness, ZapcastError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ZapcastError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        store.initialize().await?;

        let brand_id = "brand-test".to_string();
        let template_id = "tmpl-test".to_string();
        let session_id = format!("sess-{}", uuid::Uuid::new_v4());

        store
            .create_brand(&Brand {
                id: brand_id.clone(),
                name: "Test Brand".to_string(),
                prefix: self.brand_prefix,
                from_number: "+14155238886".to_string(),
            })
            .await?;
        store
            .create_template_reference(&TemplateReference {
                id: template_id.clone(),
                provider_template_id: "HXtest".to_string(),
                name: "test template".to_string(),
                has_variables: !self.mappings.is_empty() || !self.statics.is_empty(),
            })
            .await?;
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        store
            .create_session(&Session {
                id: session_id.clone(),
                name: "test session".to_string(),
                status: SessionStatus::Draft,
                brand_id,
                template_id,
                created_by: None,
                created_at: now.clone(),
                updated_at: now,
            })
            .await?;

        store
            .import_contacts(&session_id, "harness import", self.contacts)
            .await?;

        for (variable, column_key) in &self.mappings {
            store
                .add_variable_mapping(&VariableMapping {
                    session_id: session_id.clone(),
                    variable: variable.clone(),
                    column_key: column_key.clone(),
                })
                .await?;
        }
        for (variable, value) in &self.statics {
            store
                .set_static_variable(&StaticVariable {
                    session_id: session_id.clone(),
                    variable: variable.clone(),
                    value: value.clone(),
                })
                .await?;
        }

        Ok(DispatchHarness {
            store: Arc::new(store),
            provider: Arc::new(self.provider.unwrap_or_else(MockProvider::always_succeed)),
            session_id,
            _temp_dir: temp_dir,
        })
    }
}

/// A seeded campaign with a temp store and a mock provider.
pub struct DispatchHarness {
    pub store: Arc<SqliteStore>,
    pub provider: Arc<MockProvider>,
    pub session_id: String,
    _temp_dir: tempfile::TempDir,
}

impl DispatchHarness {
    pub fn builder() -> DispatchHarnessBuilder {
        DispatchHarnessBuilder::new()
    }

    /// Flip the session to RUNNING, as the external trigger would.
    pub async fn mark_running(&self) -> Result<(), ZapcastError> {
        self.store
            .update_session_status(&self.session_id, SessionStatus::Running)
            .await
    }

    /// Poll the session status until it leaves RUNNING or the timeout lapses.
    pub async fn wait_for_terminal_status(
        &self,
        timeout: Duration,
    ) -> Result<SessionStatus, ZapcastError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let session = self
                .store
                .get_session(&self.session_id)
                .await?
                .ok_or_else(|| ZapcastError::NotFound {
                    entity: "session",
                    id: self.session_id.clone(),
                })?;
            match session.status {
                SessionStatus::Completed | SessionStatus::Failed => return Ok(session.status),
                _ if tokio::time::Instant::now() >= deadline => {
                    return Err(ZapcastError::Internal(format!(
                        "session {} did not finalize within {timeout:?}",
                        self.session_id
                    )));
                }
                _ => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
    }
}
