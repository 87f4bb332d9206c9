// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the geopin photo archive bot.

use thiserror::Error;

/// The primary error type used across all geopin adapter traits and core operations.
///
/// Flow-level conditions (photo before location, missing search argument,
/// an expired media reference during rendering) are user-facing guidance
/// replies, not errors -- they never appear here.
#[derive(Debug, Error)]
pub enum GeopinError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors (database open, migration, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel adapter errors (connection failure, send failure, closed inbound queue).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
