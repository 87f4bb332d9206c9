// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent loop and submission flow for the geopin photo archive bot.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives events from a channel adapter
//! - Serializes events per user while different users run concurrently
//! - Routes submission events through the [`flow::SubmissionFlow`]
//! - Routes retrieval commands to the [`retrieval::RetrievalService`]
//! - Handles graceful shutdown

pub mod flow;
pub mod replies;
pub mod retrieval;
pub mod session;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod testutil;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

use geopin_core::types::{InboundEvent, UserEvent, UserId};
use geopin_core::{ChannelAdapter, GeopinError};

use crate::flow::SubmissionFlow;
use crate::retrieval::RetrievalService;

/// The main agent loop that pumps channel events into the flow and
/// retrieval handlers.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter>,
    flow: Arc<SubmissionFlow>,
    retrieval: Arc<RetrievalService>,
    queues: DashMap<UserId, mpsc::UnboundedSender<UserEvent>>,
    tasks: TaskTracker,
}

impl AgentLoop {
    pub fn new(
        channel: Arc<dyn ChannelAdapter>,
        flow: Arc<SubmissionFlow>,
        retrieval: Arc<RetrievalService>,
    ) -> Self {
        Self {
            channel,
            flow,
            retrieval,
            queues: DashMap::new(),
            tasks: TaskTracker::new(),
        }
    }

    /// Runs the main loop until the cancellation token is triggered or the
    /// channel closes.
    ///
    /// On exit, in-flight event tasks are drained before the channel
    /// adapter is shut down.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), GeopinError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                event = self.channel.receive() => {
                    match event {
                        Ok(inbound) => self.dispatch(inbound),
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            // If the channel is closed, break out of the loop.
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        // Dropping the senders lets each consumer drain its remaining
        // queued events and exit.
        self.queues.clear();
        self.tasks.close();
        self.tasks.wait().await;
        self.channel.shutdown().await?;

        info!("agent loop stopped");
        Ok(())
    }

    /// Pushes one inbound event onto its user's ordered queue.
    ///
    /// Each user has a dedicated consumer task fed by an in-order queue, so
    /// events from the same user are handled strictly in arrival order (a
    /// location and its photo cannot race) while different users run
    /// concurrently. A slow handler for one user never stalls the receive
    /// loop or other users.
    fn dispatch(&self, inbound: InboundEvent) {
        let user = inbound.user_id;
        let sender = self.queues.entry(user).or_insert_with(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            self.spawn_consumer(user, rx);
            tx
        });
        if sender.send(inbound.event).is_err() {
            error!(user = %user, "user event queue closed, dropping event");
        }
    }

    /// Spawns the consumer task that handles one user's events in order.
    fn spawn_consumer(&self, user: UserId, mut rx: mpsc::UnboundedReceiver<UserEvent>) {
        let flow = self.flow.clone();
        let retrieval = self.retrieval.clone();

        self.tasks.spawn(async move {
            while let Some(event) = rx.recv().await {
                let result = match event {
                    UserEvent::Submission(event) => flow.handle(user, event).await,
                    UserEvent::Recent => retrieval.recent_command(user).await,
                    UserEvent::Search(query) => {
                        retrieval.search_command(user, query.as_deref()).await
                    }
                };
                if let Err(e) = result {
                    error!(user = %user, error = %e, "event handling failed");
                }
            }
        });
    }
}
