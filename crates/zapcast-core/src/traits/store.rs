// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data store trait consumed by the dispatch pipeline.

use async_trait::async_trait;

use crate::error::ZapcastError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    Brand, Contact, MessageId, MessageStatus, Session, SessionStatus, StaticVariable,
    TemplateReference, VariableMapping,
};

/// Persistence operations the pipeline requires.
///
/// The store is assumed to serialize concurrent writes to distinct rows
/// safely; the pipeline never spans a transaction across message rows.
#[async_trait]
pub trait DataStore: PluginAdapter {
    /// All contacts belonging to the session's contact lists.
    async fn find_contacts_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<Contact>, ZapcastError>;

    async fn get_contact(&self, contact_id: &str) -> Result<Option<Contact>, ZapcastError>;

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ZapcastError>;

    async fn get_brand(&self, brand_id: &str) -> Result<Option<Brand>, ZapcastError>;

    async fn get_template_reference(
        &self,
        template_id: &str,
    ) -> Result<Option<TemplateReference>, ZapcastError>;

    async fn get_variable_mappings(
        &self,
        session_id: &str,
    ) -> Result<Vec<VariableMapping>, ZapcastError>;

    async fn get_static_variables(
        &self,
        session_id: &str,
    ) -> Result<Vec<StaticVariable>, ZapcastError>;

    /// Create an outbound message row and return its id.
    async fn create_message(
        &self,
        session_id: &str,
        contact_id: &str,
        status: MessageStatus,
        error: Option<&str>,
    ) -> Result<MessageId, ZapcastError>;

    /// Move an outbound message row to its terminal state.
    async fn update_message(
        &self,
        message_id: &MessageId,
        status: MessageStatus,
        provider_sid: Option<&str>,
        error: Option<&str>,
    ) -> Result<(), ZapcastError>;

    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<(), ZapcastError>;
}
