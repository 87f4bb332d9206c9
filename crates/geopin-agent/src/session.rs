// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user submission sessions.
//!
//! A session holds the location a user shared while we wait for the matching
//! photo. Sessions live in memory only: a restart drops them and the user
//! starts over with a fresh location.

use dashmap::DashMap;

use geopin_core::types::UserId;

/// The location half of a two-phase submission, waiting for its photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLocation {
    pub lat: f64,
    pub lon: f64,
    /// Resolved display address, or the coordinate fallback.
    pub address: String,
}

/// Concurrent map of in-flight submission sessions, keyed by user.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: DashMap<UserId, PendingLocation>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the user's location, replacing any earlier unconsumed one.
    pub fn set_location(&self, user: UserId, pending: PendingLocation) {
        self.inner.insert(user, pending);
    }

    /// The user's pending location, if a submission is in flight.
    pub fn get(&self, user: UserId) -> Option<PendingLocation> {
        self.inner.get(&user).map(|entry| entry.clone())
    }

    /// Ends the user's submission, if any.
    pub fn clear(&self, user: UserId) {
        self.inner.remove(&user);
    }
}
