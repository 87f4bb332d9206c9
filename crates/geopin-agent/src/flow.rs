// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two-phase submission flow: location first, then photo.
//!
//! State transitions per user:
//! - `Start` clears any pending location and asks for a fresh one.
//! - `Location` resolves an address and arms the session.
//! - `Photo` with an armed session archives the photo; without one it asks
//!   for a location. The session survives a failed save so the user can
//!   retry by resending the photo.

use std::sync::Arc;

use tracing::{error, info, warn};

use geopin_core::types::{Coordinates, MediaRef, NewSubmission, SubmissionEvent, UserId};
use geopin_core::{Geocoder, GeopinError, MessageSink, RecordStore};

use crate::replies;
use crate::session::{PendingLocation, SessionMap};

/// Drives one user's submission from shared location to stored photo.
pub struct SubmissionFlow {
    store: Arc<dyn RecordStore>,
    geocoder: Arc<dyn Geocoder>,
    sink: Arc<dyn MessageSink>,
    sessions: Arc<SessionMap>,
}

impl SubmissionFlow {
    pub fn new(
        store: Arc<dyn RecordStore>,
        geocoder: Arc<dyn Geocoder>,
        sink: Arc<dyn MessageSink>,
        sessions: Arc<SessionMap>,
    ) -> Self {
        Self {
            store,
            geocoder,
            sink,
            sessions,
        }
    }

    /// Handles one submission event for `user`.
    pub async fn handle(&self, user: UserId, event: SubmissionEvent) -> Result<(), GeopinError> {
        match event {
            SubmissionEvent::Start => self.handle_start(user).await,
            SubmissionEvent::Location(coords) => self.handle_location(user, coords).await,
            SubmissionEvent::Photo(media) => self.handle_photo(user, media).await,
            SubmissionEvent::Other => self.sink.send_text(user, replies::GUIDANCE).await,
        }
    }

    async fn handle_start(&self, user: UserId) -> Result<(), GeopinError> {
        self.sessions.clear(user);
        self.sink.request_location(user, replies::START).await
    }

    async fn handle_location(&self, user: UserId, coords: Coordinates) -> Result<(), GeopinError> {
        let address = self.geocoder.resolve(coords).await;
        self.sessions.set_location(
            user,
            PendingLocation {
                lat: coords.lat,
                lon: coords.lon,
                address: address.clone(),
            },
        );
        info!(user = %user, address = %address, "location armed");
        self.sink
            .send_text(user, &replies::location_stored(&address))
            .await
    }

    async fn handle_photo(&self, user: UserId, media: MediaRef) -> Result<(), GeopinError> {
        let Some(pending) = self.sessions.get(user) else {
            return self.sink.send_text(user, replies::NEED_LOCATION).await;
        };

        // Best-effort: a failed forward never blocks the local record.
        let caption = replies::caption(&pending.address);
        let archive_ref = match self.sink.forward_to_archive(&media, &caption).await {
            Ok(reference) => reference,
            Err(e) => {
                warn!(user = %user, error = %e, "archive forward failed");
                None
            }
        };

        let new = NewSubmission {
            user_id: user,
            media_ref: media,
            lat: pending.lat,
            lon: pending.lon,
            address: pending.address.clone(),
            archive_ref,
        };

        match self.store.insert(&new).await {
            Ok(id) => {
                // Consume the session only after the row is durable.
                self.sessions.clear(user);
                info!(user = %user, id, "submission stored");
                self.sink
                    .send_text(user, &replies::saved(&pending.address))
                    .await
            }
            Err(e) => {
                // Session stays armed so resending the photo retries.
                error!(user = %user, error = %e, "submission insert failed");
                self.sink.send_text(user, replies::SAVE_FAILED).await
            }
        }
    }
}
