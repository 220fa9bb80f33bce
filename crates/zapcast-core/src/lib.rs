// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Zapcast campaign pipeline.
//!
//! This crate provides the foundational trait definitions, error types,
//! domain types, and the pure leaves of the pipeline (phone normalization
//! and variable resolution) used throughout the Zapcast workspace.

pub mod error;
pub mod phone;
pub mod traits;
pub mod types;
pub mod variables;

// Re-export key items at crate root for ergonomic imports.
pub use error::ZapcastError;
pub use types::{
    AdapterType, HealthStatus, MessageId, MessageSid, MessageStatus, SessionId, SessionStatus,
};

// Re-export all adapter traits at crate root.
pub use traits::{DataStore, PluginAdapter, ProviderClient};
