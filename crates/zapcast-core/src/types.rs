// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and the dispatch pipeline.
//!
//! Entity structs carry plain string ids; the newtypes below are used at
//! trait boundaries where the kind of id matters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a campaign session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Unique identifier for an outbound message record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Provider-assigned identifier returned for an accepted send.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageSid(pub String);

/// Lifecycle of a campaign session.
///
/// Transitions are one-way: DRAFT -> RUNNING (dispatch trigger) ->
/// COMPLETED or FAILED (progress tracker finalization).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Draft,
    Running,
    Completed,
    Failed,
}

/// Lifecycle of one outbound message.
///
/// A row is created PENDING when a send attempt starts and is updated
/// exactly once to SENT or FAILED. Rows for unparseable phones are created
/// FAILED directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageStatus {
    Pending,
    Sent,
    Failed,
}

/// Identifies the type of adapter in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Provider,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// One campaign: a brand, a template, a contact list, and its aggregate status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub status: SessionStatus,
    pub brand_id: String,
    pub template_id: String,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One recipient with a phone number and arbitrary per-recipient data fields.
///
/// Contacts are created at session setup and are immutable during dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub contact_list_id: String,
    pub phone: String,
    /// Raw row data keyed by source column name.
    pub raw_data: serde_json::Map<String, serde_json::Value>,
}

/// A named group of contacts belonging to one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactList {
    pub id: String,
    pub name: String,
    pub session_id: String,
}

/// A sending identity: display name, optional channel routing prefix, and
/// the originating from-number passed to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub prefix: Option<String>,
    pub from_number: String,
}

impl Brand {
    /// The provider-facing sender address, with the routing prefix applied.
    pub fn sender(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.from_number),
            None => self.from_number.clone(),
        }
    }
}

/// A provider-hosted message template, optionally containing numbered
/// variable placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateReference {
    pub id: String,
    /// The provider-side template id used in send requests.
    pub provider_template_id: String,
    pub name: String,
    pub has_variables: bool,
}

/// Declares that a numeric template placeholder is filled from a named
/// column of each contact's raw data, for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableMapping {
    pub session_id: String,
    pub variable: String,
    pub column_key: String,
}

/// A session-wide literal placeholder value (e.g. a media filename).
/// Per-contact mappings override a static value for the same placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticVariable {
    pub session_id: String,
    pub variable: String,
    pub value: String,
}

/// The record of one attempted send to one contact within one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub id: String,
    pub session_id: String,
    pub contact_id: String,
    pub status: MessageStatus,
    pub provider_sid: Option<String>,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One templated send handed to a provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// Destination in E.164 format.
    pub to: String,
    /// Sender address, routing prefix included.
    pub from: String,
    /// Provider-side template id.
    pub template_id: String,
    /// Placeholder substitutions; empty means no substitution payload.
    pub variables: BTreeMap<String, String>,
}

/// Per-session message status counts for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub sent: i64,
    pub failed: i64,
    pub pending: i64,
    pub total: i64,
}
