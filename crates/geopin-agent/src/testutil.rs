// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory fakes for the adapter traits, shared by the flow and
//! retrieval tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use geopin_core::types::{
    Coordinates, InboundEvent, MediaRef, NewSubmission, SubmissionPreview, UserId,
};
use geopin_core::{
    AdapterType, ChannelAdapter, Geocoder, GeopinError, HealthStatus, MessageSink, PluginAdapter,
    RecordStore,
};

fn storage_error(message: &str) -> GeopinError {
    GeopinError::Storage {
        source: message.to_string().into(),
    }
}

/// Record store backed by a Vec, newest entries last.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<NewSubmission>>,
    fail_insert: AtomicBool,
    fail_recent: AtomicBool,
    search_calls: AtomicUsize,
    last_needle: Mutex<Option<String>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the trait.
    pub fn seed(&self, row: NewSubmission) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn submissions(&self) -> Vec<NewSubmission> {
        self.rows.lock().unwrap().clone()
    }

    /// Makes the next `insert` fail.
    pub fn fail_next_insert(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    /// Makes the next `recent` fail.
    pub fn fail_next_recent(&self) {
        self.fail_recent.store(true, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn last_search_needle(&self) -> Option<String> {
        self.last_needle.lock().unwrap().clone()
    }

    fn previews_newest_first(&self) -> Vec<SubmissionPreview> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|row| SubmissionPreview {
                media_ref: row.media_ref.clone(),
                address: row.address.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl PluginAdapter for FakeStore {
    fn name(&self) -> &str {
        "fake-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn initialize(&self) -> Result<(), GeopinError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), GeopinError> {
        Ok(())
    }

    async fn insert(&self, submission: &NewSubmission) -> Result<i64, GeopinError> {
        if self.fail_insert.swap(false, Ordering::SeqCst) {
            return Err(storage_error("insert failed"));
        }
        let mut rows = self.rows.lock().unwrap();
        rows.push(submission.clone());
        Ok(rows.len() as i64)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<SubmissionPreview>, GeopinError> {
        if self.fail_recent.swap(false, Ordering::SeqCst) {
            return Err(storage_error("recent failed"));
        }
        let mut previews = self.previews_newest_first();
        previews.truncate(limit as usize);
        Ok(previews)
    }

    async fn search(&self, needle: &str) -> Result<Vec<SubmissionPreview>, GeopinError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_needle.lock().unwrap() = Some(needle.to_string());
        let needle = needle.to_lowercase();
        Ok(self
            .previews_newest_first()
            .into_iter()
            .filter(|p| p.address.to_lowercase().contains(&needle))
            .collect())
    }
}

/// Geocoder that always resolves to a fixed address.
pub struct FakeGeocoder {
    address: String,
}

impl FakeGeocoder {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

#[async_trait]
impl PluginAdapter for FakeGeocoder {
    fn name(&self) -> &str {
        "fake-geocoder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Geocoder
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        Ok(())
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, _coords: Coordinates) -> String {
        self.address.clone()
    }
}

/// Channel that replays a scripted list of events, then reports itself
/// closed.
pub struct FakeChannel {
    events: Mutex<std::collections::VecDeque<InboundEvent>>,
}

impl FakeChannel {
    pub fn new(events: Vec<InboundEvent>) -> Self {
        Self {
            events: Mutex::new(events.into()),
        }
    }
}

#[async_trait]
impl PluginAdapter for FakeChannel {
    fn name(&self) -> &str {
        "fake-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for FakeChannel {
    async fn connect(&mut self) -> Result<(), GeopinError> {
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, GeopinError> {
        let next = self.events.lock().unwrap().pop_front();
        match next {
            Some(event) => Ok(event),
            None => Err(GeopinError::Channel {
                message: "channel closed".to_string(),
                source: None,
            }),
        }
    }
}

/// Message sink that records everything sent through it.
#[derive(Default)]
pub struct FakeSink {
    texts: Mutex<Vec<(UserId, String)>>,
    media: Mutex<Vec<(UserId, MediaRef, String)>>,
    location_requests: Mutex<Vec<UserId>>,
    failing_media: Mutex<HashSet<String>>,
    archive_ref: Mutex<Option<String>>,
    fail_forward: AtomicBool,
    forwards: Mutex<Vec<MediaRef>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts_for(&self, user: UserId) -> Vec<String> {
        self.texts
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn media_for(&self, user: UserId) -> Vec<(MediaRef, String)> {
        self.media
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _, _)| *u == user)
            .map(|(_, media, caption)| (media.clone(), caption.clone()))
            .collect()
    }

    pub fn location_requests(&self) -> Vec<UserId> {
        self.location_requests.lock().unwrap().clone()
    }

    pub fn forwards(&self) -> Vec<MediaRef> {
        self.forwards.lock().unwrap().clone()
    }

    /// Makes `send_media` fail for the given media reference.
    pub fn fail_media(&self, media_ref: &str) {
        self.failing_media
            .lock()
            .unwrap()
            .insert(media_ref.to_string());
    }

    /// Sets the reference returned by successful archive forwards.
    pub fn set_archive_ref(&self, reference: Option<String>) {
        *self.archive_ref.lock().unwrap() = reference;
    }

    /// Makes all archive forwards fail.
    pub fn fail_forwards(&self) {
        self.fail_forward.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageSink for FakeSink {
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), GeopinError> {
        self.texts.lock().unwrap().push((user, text.to_string()));
        Ok(())
    }

    async fn request_location(&self, user: UserId, text: &str) -> Result<(), GeopinError> {
        self.location_requests.lock().unwrap().push(user);
        self.texts.lock().unwrap().push((user, text.to_string()));
        Ok(())
    }

    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: &str,
    ) -> Result<(), GeopinError> {
        if self.failing_media.lock().unwrap().contains(&media.0) {
            return Err(GeopinError::Channel {
                message: format!("media reference expired: {media}"),
                source: None,
            });
        }
        self.media
            .lock()
            .unwrap()
            .push((user, media.clone(), caption.to_string()));
        Ok(())
    }

    async fn forward_to_archive(
        &self,
        media: &MediaRef,
        _caption: &str,
    ) -> Result<Option<String>, GeopinError> {
        if self.fail_forward.load(Ordering::SeqCst) {
            return Err(GeopinError::Channel {
                message: "forward failed".to_string(),
                source: None,
            });
        }
        self.forwards.lock().unwrap().push(media.clone());
        Ok(self.archive_ref.lock().unwrap().clone())
    }
}
