// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Zapcast campaign pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Zapcast configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZapcastConfig {
    /// Dispatch pipeline settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Messaging provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Dispatch pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Maximum dispatch tasks in flight across all sessions in the process.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Default region for parsing bare national phone numbers.
    #[serde(default = "default_region")]
    pub default_region: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            default_region: default_region(),
        }
    }
}

fn default_concurrency() -> usize {
    5
}

fn default_region() -> String {
    "BR".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Whether to enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "zapcast.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Messaging provider configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider account identifier. `None` requires environment variable.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Provider auth token. `None` requires environment variable.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Override for the provider API base URL (used in testing).
    #[serde(default)]
    pub base_url: Option<String>,
}
