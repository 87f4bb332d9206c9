// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for the submission archive.

use async_trait::async_trait;

use crate::error::GeopinError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewSubmission, SubmissionPreview};

/// Adapter for the durable, append-only submission archive.
///
/// Implementations must create each submission atomically: on any insert
/// failure no partial row may be visible. Read operations return empty
/// sequences, never errors, when nothing matches.
#[async_trait]
pub trait RecordStore: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, PRAGMAs).
    async fn initialize(&self) -> Result<(), GeopinError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), GeopinError>;

    /// Appends one submission and returns its store-assigned id.
    async fn insert(&self, submission: &NewSubmission) -> Result<i64, GeopinError>;

    /// Returns up to `limit` submissions, most recent first.
    async fn recent(&self, limit: i64) -> Result<Vec<SubmissionPreview>, GeopinError>;

    /// Returns submissions whose address contains `needle`
    /// (case-insensitive), most recent first.
    async fn search(&self, needle: &str) -> Result<Vec<SubmissionPreview>, GeopinError>;
}
