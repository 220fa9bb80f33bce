// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as the concurrency bound and the default phone region.

use zapcast_core::phone;

use crate::diagnostic::{ConfigError, suggest_key};
use crate::model::ZapcastConfig;

/// Upper bound on the dispatch concurrency cap. The cap throttles provider
/// traffic; values beyond this are almost certainly a typo.
const MAX_CONCURRENCY: usize = 128;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ZapcastConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.dispatch.concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "dispatch.concurrency must be at least 1".to_string(),
        });
    }

    if config.dispatch.concurrency > MAX_CONCURRENCY {
        errors.push(ConfigError::Validation {
            message: format!(
                "dispatch.concurrency must be at most {MAX_CONCURRENCY}, got {}",
                config.dispatch.concurrency
            ),
        });
    }

    let region = config.dispatch.default_region.trim();
    if phone::region(region).is_none() {
        let known: Vec<&str> = phone::known_regions().collect();
        let message = match suggest_key(region, &known) {
            Some(suggestion) => format!(
                "dispatch.default_region `{region}` is not supported, did you mean `{suggestion}`? Supported: {}",
                known.join(", ")
            ),
            None => format!(
                "dispatch.default_region `{region}` is not supported. Supported: {}",
                known.join(", ")
            ),
        };
        errors.push(ConfigError::Validation { message });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Provider credentials only make sense as a pair.
    if config.provider.account_sid.is_some() != config.provider.auth_token.is_some() {
        errors.push(ConfigError::Validation {
            message: "provider.account_sid and provider.auth_token must be set together"
                .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ZapcastConfig::default()).is_ok());
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let mut config = ZapcastConfig::default();
        config.dispatch.concurrency = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("concurrency"))
        ));
    }

    #[test]
    fn oversized_concurrency_fails_validation() {
        let mut config = ZapcastConfig::default();
        config.dispatch.concurrency = 10_000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn unknown_region_fails_with_suggestion() {
        let mut config = ZapcastConfig::default();
        config.dispatch.default_region = "BRA".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("did you mean `BR`"))
        ));
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ZapcastConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn lone_provider_credential_fails_validation() {
        let mut config = ZapcastConfig::default();
        config.provider.account_sid = Some("AC123".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("set together"))
        ));
    }

    #[test]
    fn paired_provider_credentials_pass() {
        let mut config = ZapcastConfig::default();
        config.provider.account_sid = Some("AC123".to_string());
        config.provider.auth_token = Some("secret".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
