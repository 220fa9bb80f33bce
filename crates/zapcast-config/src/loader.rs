// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zapcast.toml` > `~/.config/zapcast/zapcast.toml`
//! > `/etc/zapcast/zapcast.toml` with environment variable overrides via the
//! `ZAPCAST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ZapcastConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zapcast/zapcast.toml` (system-wide)
/// 3. `~/.config/zapcast/zapcast.toml` (user XDG config)
/// 4. `./zapcast.toml` (local directory)
/// 5. `ZAPCAST_*` environment variables
pub fn load_config() -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::file("/etc/zapcast/zapcast.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zapcast/zapcast.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zapcast.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZapcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapcastConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ZAPCAST_DISPATCH_DEFAULT_REGION` must
/// map to `dispatch.default_region`, not `dispatch.default.region`.
fn env_provider() -> Env {
    Env::prefixed("ZAPCAST_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("dispatch_", "dispatch.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("provider_", "provider.", 1);
        mapped.into()
    })
}
