// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `zapcast-core::types` for use across
//! adapter trait boundaries. This module re-exports them for convenience
//! within the storage crate, plus row-decoding helpers shared by the query
//! modules.

use std::str::FromStr;

pub use zapcast_core::types::{
    Brand, Contact, ContactList, MessageStatus, OutboundMessage, Session, SessionStats,
    SessionStatus, StaticVariable, TemplateReference, VariableMapping,
};

/// Decode a TEXT column holding a strum-serialized enum.
pub(crate) fn decode_enum<T>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Decode a TEXT column holding a JSON object.
pub(crate) fn decode_json_object(
    idx: usize,
    value: String,
) -> rusqlite::Result<serde_json::Map<String, serde_json::Value>> {
    serde_json::from_str(&value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
