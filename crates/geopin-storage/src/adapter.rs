// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use geopin_config::model::StorageConfig;
use geopin_core::types::{NewSubmission, SubmissionPreview};
use geopin_core::{AdapterType, GeopinError, HealthStatus, PluginAdapter, RecordStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`RecordStore::initialize`].
pub struct SqliteRecordStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore with the given configuration.
    ///
    /// The database connection is not opened until [`RecordStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, GeopinError> {
        self.db.get().ok_or_else(|| GeopinError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteRecordStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn initialize(&self) -> Result<(), GeopinError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| GeopinError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite record store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GeopinError> {
        self.db()?.close().await
    }

    async fn insert(&self, new: &NewSubmission) -> Result<i64, GeopinError> {
        queries::submissions::insert_submission(self.db()?, new).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<SubmissionPreview>, GeopinError> {
        queries::submissions::recent_submissions(self.db()?, limit).await
    }

    async fn search(&self, needle: &str) -> Result<Vec<SubmissionPreview>, GeopinError> {
        queries::submissions::search_submissions(self.db()?, needle).await
    }
}
