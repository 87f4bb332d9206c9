// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the submission flow.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Numeric identifier of a chat user, as assigned by the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to an uploaded image within the messaging channel.
///
/// This is a platform-side reference (a Telegram `file_id`), not image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef(pub String);

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair. The two coordinates are only ever carried together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A submission before the record store has assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub user_id: UserId,
    pub media_ref: MediaRef,
    pub lat: f64,
    pub lon: f64,
    /// Resolved display address, or the coordinate fallback. Never empty.
    pub address: String,
    /// Reference to the forwarded archive copy, when forwarding succeeded.
    pub archive_ref: Option<String>,
}

/// A fully persisted submission row.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub user_id: UserId,
    pub media_ref: MediaRef,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub archive_ref: Option<String>,
    /// Store-assigned UTC timestamp, RFC 3339 with millisecond precision.
    pub created_at: String,
}

/// One row of a recent/search result: just enough to render a media reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPreview {
    pub media_ref: MediaRef,
    pub address: String,
}

/// Inputs to the two-phase submission flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// Explicit start/restart command.
    Start,
    /// The user shared a location.
    Location(Coordinates),
    /// The user sent a photo, identified by its media reference.
    Photo(MediaRef),
    /// Anything else (plain text, stickers, voice, ...).
    Other,
}

/// Any event extracted from an inbound chat message.
///
/// Retrieval commands bypass the submission flow entirely, so they sit
/// beside [`SubmissionEvent`] rather than inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    Submission(SubmissionEvent),
    /// List the most recent submissions.
    Recent,
    /// Search stored submissions by address substring. `None` when the
    /// command was sent without an argument.
    Search(Option<String>),
}

/// An event paired with the user it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub event: UserEvent,
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

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
    Geocoder,
}
