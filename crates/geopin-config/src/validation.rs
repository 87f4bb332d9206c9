// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid log levels and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::GeopinConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GeopinConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.agent.recent_limit < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.recent_limit must be at least 1, got {}",
                config.agent.recent_limit
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let endpoint = config.geocoder.endpoint.trim();
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("geocoder.endpoint must be an http(s) URL, got `{endpoint}`"),
        });
    }

    if config.geocoder.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "geocoder.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.geocoder.user_agent.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "geocoder.user_agent must not be empty (Nominatim requires an identifying User-Agent)".to_string(),
        });
    }

    if config.archive.chat_id == Some(0) {
        errors.push(ConfigError::Validation {
            message: "archive.chat_id must be a real chat identifier, got 0".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
