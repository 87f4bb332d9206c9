// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./geopin.toml` > `~/.config/geopin/geopin.toml` >
//! `/etc/geopin/geopin.toml` with environment variable overrides via the
//! `GEOPIN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GeopinConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/geopin/geopin.toml` (system-wide)
/// 3. `~/.config/geopin/geopin.toml` (user XDG config)
/// 4. `./geopin.toml` (local directory)
/// 5. `GEOPIN_*` environment variables
pub fn load_config() -> Result<GeopinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GeopinConfig::default()))
        .merge(Toml::file("/etc/geopin/geopin.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("geopin/geopin.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("geopin.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GeopinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GeopinConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GeopinConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GeopinConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GEOPIN_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("GEOPIN_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GEOPIN_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("geocoder_", "geocoder.", 1)
            .replacen("archive_", "archive.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_loader_applies_defaults_under_partial_config() {
        let config = load_config_from_str(
            r#"
[telegram]
bot_token = "123:abc"
"#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.agent.name, "geopin");
        assert_eq!(config.geocoder.timeout_secs, 5);
    }

    #[test]
    fn env_vars_override_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "geopin.toml",
                r#"
[agent]
recent_limit = 5
"#,
            )?;
            jail.set_env("GEOPIN_AGENT_RECENT_LIMIT", "3");
            let config: GeopinConfig = Figment::new()
                .merge(Serialized::defaults(GeopinConfig::default()))
                .merge(Toml::file("geopin.toml"))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.agent.recent_limit, 3);
            Ok(())
        });
    }

    #[test]
    fn env_mapping_keeps_underscored_key_names_whole() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GEOPIN_TELEGRAM_BOT_TOKEN", "456:def");
            let config: GeopinConfig = Figment::new()
                .merge(Serialized::defaults(GeopinConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.telegram.bot_token.as_deref(), Some("456:def"));
            Ok(())
        });
    }
}
