// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the geopin photo archive bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level geopin configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values,
/// except that `telegram.bot_token` must be set for the bot to run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeopinConfig {
    /// Bot identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reverse geocoding settings.
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Archive-forwarding settings.
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How many submissions the recent-listing command returns.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: i64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_agent_name() -> String {
    "geopin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_recent_limit() -> i64 {
    10
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to run the bot.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// List of allowed Telegram user IDs or usernames.
    /// An empty list leaves the bot open to everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
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
    dirs::data_dir()
        .map(|p| p.join("geopin").join("geopin.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "geopin.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Reverse geocoding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeocoderConfig {
    /// Reverse geocoding endpoint URL.
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,

    /// `accept-language` value sent with each lookup.
    #[serde(default = "default_geocoder_language")]
    pub language: String,

    /// Per-lookup timeout in seconds.
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header. Nominatim's usage policy requires an
    /// identifying value.
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            language: default_geocoder_language(),
            timeout_secs: default_geocoder_timeout_secs(),
            user_agent: default_geocoder_user_agent(),
        }
    }
}

fn default_geocoder_endpoint() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_geocoder_language() -> String {
    "ru".to_string()
}

fn default_geocoder_timeout_secs() -> u64 {
    5
}

fn default_geocoder_user_agent() -> String {
    "geopin/0.1 (https://github.com/geopin/geopin)".to_string()
}

/// Archive-forwarding configuration.
///
/// When `chat_id` is set, every accepted photo is forwarded to that chat
/// (best-effort) before the local record is written.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Destination chat for forwarded photos. `None` disables forwarding.
    #[serde(default)]
    pub chat_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = GeopinConfig::default();
        assert_eq!(config.agent.name, "geopin");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.agent.recent_limit, 10);
        assert!(config.telegram.bot_token.is_none());
        assert!(config.telegram.allowed_users.is_empty());
        assert!(config.storage.wal_mode);
        assert_eq!(config.geocoder.timeout_secs, 5);
        assert_eq!(config.geocoder.language, "ru");
        assert!(config.archive.chat_id.is_none());
    }

    #[test]
    fn toml_sections_deserialize() {
        let toml_str = r#"
[agent]
name = "photobot"
recent_limit = 5

[telegram]
bot_token = "123:abc"
allowed_users = ["42", "@someone"]

[storage]
database_path = "/tmp/photos.db"

[geocoder]
language = "en"
timeout_secs = 3

[archive]
chat_id = -1001234567890
"#;
        let config: GeopinConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.name, "photobot");
        assert_eq!(config.agent.recent_limit, 5);
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.telegram.allowed_users.len(), 2);
        assert_eq!(config.storage.database_path, "/tmp/photos.db");
        assert_eq!(config.geocoder.language, "en");
        assert_eq!(config.geocoder.timeout_secs, 3);
        assert_eq!(config.archive.chat_id, Some(-1001234567890));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[agent]
naem = "typo"
"#;
        assert!(toml::from_str::<GeopinConfig>(toml_str).is_err());
    }
}
