// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval commands: list recent submissions and search by address.
//!
//! Rendering is per-item isolated: one expired media reference must not
//! abort the rest of the batch.

use std::sync::Arc;

use tracing::{error, warn};

use geopin_core::types::{SubmissionPreview, UserId};
use geopin_core::{GeopinError, MessageSink, RecordStore};

use crate::replies;

/// Read-only access to the archive, bypassing the submission flow.
pub struct RetrievalService {
    store: Arc<dyn RecordStore>,
    sink: Arc<dyn MessageSink>,
    recent_limit: i64,
}

impl RetrievalService {
    pub fn new(store: Arc<dyn RecordStore>, sink: Arc<dyn MessageSink>, recent_limit: i64) -> Self {
        Self {
            store,
            sink,
            recent_limit,
        }
    }

    /// Replies with the newest submissions, most recent first.
    pub async fn recent_command(&self, user: UserId) -> Result<(), GeopinError> {
        let previews = match self.store.recent(self.recent_limit).await {
            Ok(previews) => previews,
            Err(e) => {
                error!(user = %user, error = %e, "recent listing failed");
                return self.sink.send_text(user, replies::LISTING_FAILED).await;
            }
        };

        if previews.is_empty() {
            return self.sink.send_text(user, replies::ARCHIVE_EMPTY).await;
        }
        self.render(user, &previews).await
    }

    /// Replies with submissions whose address contains `query`.
    ///
    /// A missing or blank query gets a usage hint; the store is not
    /// consulted in that case.
    pub async fn search_command(
        &self,
        user: UserId,
        query: Option<&str>,
    ) -> Result<(), GeopinError> {
        let needle = query.map(str::trim).unwrap_or_default();
        if needle.is_empty() {
            return self.sink.send_text(user, replies::SEARCH_USAGE).await;
        }

        let previews = match self.store.search(needle).await {
            Ok(previews) => previews,
            Err(e) => {
                error!(user = %user, error = %e, "search failed");
                return self.sink.send_text(user, replies::LISTING_FAILED).await;
            }
        };

        if previews.is_empty() {
            return self.sink.send_text(user, replies::NOTHING_FOUND).await;
        }
        self.render(user, &previews).await
    }

    /// Sends each preview as a media reply, falling back to a text notice
    /// for references the platform can no longer resolve.
    async fn render(&self, user: UserId, previews: &[SubmissionPreview]) -> Result<(), GeopinError> {
        for preview in previews {
            let caption = replies::caption(&preview.address);
            if let Err(e) = self
                .sink
                .send_media(user, &preview.media_ref, &caption)
                .await
            {
                warn!(
                    user = %user,
                    media = %preview.media_ref,
                    error = %e,
                    "media send failed, degrading to text"
                );
                if let Err(e) = self
                    .sink
                    .send_text(user, &replies::media_unavailable(&preview.address))
                    .await
                {
                    warn!(user = %user, error = %e, "fallback text failed");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeSink, FakeStore};
    use geopin_core::types::{MediaRef, NewSubmission};

    fn submission(media: &str, address: &str) -> NewSubmission {
        NewSubmission {
            user_id: UserId(9),
            media_ref: MediaRef(media.to_string()),
            lat: 0.0,
            lon: 0.0,
            address: address.to_string(),
            archive_ref: None,
        }
    }

    fn fixture(limit: i64) -> (RetrievalService, Arc<FakeStore>, Arc<FakeSink>) {
        let store = Arc::new(FakeStore::new());
        let sink = Arc::new(FakeSink::new());
        let service = RetrievalService::new(store.clone(), sink.clone(), limit);
        (service, store, sink)
    }

    #[tokio::test]
    async fn recent_on_empty_archive_says_so() {
        let (service, _store, sink) = fixture(10);
        service.recent_command(UserId(1)).await.unwrap();
        assert_eq!(sink.texts_for(UserId(1)), vec![replies::ARCHIVE_EMPTY]);
        assert!(sink.media_for(UserId(1)).is_empty());
    }

    #[tokio::test]
    async fn recent_sends_newest_first_up_to_limit() {
        let (service, store, sink) = fixture(3);
        for i in 0..5 {
            store.seed(submission(&format!("f{i}"), &format!("Addr {i}")));
        }

        service.recent_command(UserId(1)).await.unwrap();

        let media = sink.media_for(UserId(1));
        assert_eq!(media.len(), 3);
        assert_eq!(media[0].0.0, "f4");
        assert_eq!(media[2].0.0, "f2");
        assert!(media[0].1.contains("Addr 4"));
    }

    #[tokio::test]
    async fn recent_store_failure_reports_to_user() {
        let (service, store, sink) = fixture(10);
        store.fail_next_recent();
        service.recent_command(UserId(1)).await.unwrap();
        assert_eq!(sink.texts_for(UserId(1)), vec![replies::LISTING_FAILED]);
    }

    #[tokio::test]
    async fn expired_media_degrades_per_item_and_continues() {
        let (service, store, sink) = fixture(10);
        store.seed(submission("good-1", "First St"));
        store.seed(submission("bad", "Broken Ave"));
        store.seed(submission("good-2", "Second St"));
        sink.fail_media("bad");

        service.recent_command(UserId(1)).await.unwrap();

        let media = sink.media_for(UserId(1));
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].0.0, "good-2");
        assert_eq!(media[1].0.0, "good-1");
        assert_eq!(
            sink.texts_for(UserId(1)),
            vec![replies::media_unavailable("Broken Ave")]
        );
    }

    #[tokio::test]
    async fn search_without_query_gets_usage_hint() {
        let (service, store, sink) = fixture(10);
        store.seed(submission("f1", "Baker Street"));

        service.search_command(UserId(1), None).await.unwrap();
        service.search_command(UserId(1), Some("   ")).await.unwrap();

        assert_eq!(
            sink.texts_for(UserId(1)),
            vec![replies::SEARCH_USAGE, replies::SEARCH_USAGE]
        );
        assert_eq!(store.search_calls(), 0);
    }

    #[tokio::test]
    async fn search_renders_matches() {
        let (service, store, sink) = fixture(10);
        store.seed(submission("f1", "Baker Street, London"));
        store.seed(submission("f2", "Fifth Avenue, New York"));

        service.search_command(UserId(1), Some("london")).await.unwrap();

        let media = sink.media_for(UserId(1));
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].0.0, "f1");
    }

    #[tokio::test]
    async fn search_with_no_matches_says_nothing_found() {
        let (service, store, sink) = fixture(10);
        store.seed(submission("f1", "Baker Street"));
        service.search_command(UserId(1), Some("mars")).await.unwrap();
        assert_eq!(sink.texts_for(UserId(1)), vec![replies::NOTHING_FOUND]);
    }

    #[tokio::test]
    async fn search_query_is_trimmed() {
        let (service, store, _sink) = fixture(10);
        store.seed(submission("f1", "Baker Street"));
        service
            .search_command(UserId(1), Some("  baker  "))
            .await
            .unwrap();
        assert_eq!(store.last_search_needle(), Some("baker".to_string()));
    }
}
