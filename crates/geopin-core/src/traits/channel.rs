// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter traits for the messaging platform integration.

use async_trait::async_trait;

use crate::error::GeopinError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundEvent, MediaRef, UserId};

/// Inbound side of a messaging channel.
///
/// The adapter owns the platform connection (long polling, webhooks, ...)
/// and turns raw messages into [`InboundEvent`]s for the agent loop.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), GeopinError>;

    /// Receives the next inbound event from the channel.
    async fn receive(&self) -> Result<InboundEvent, GeopinError>;
}

/// Outbound reply surface used by the submission flow and retrieval service.
///
/// Every method reports send failures as a recoverable per-call error;
/// callers decide whether a failure aborts the current interaction.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Sends a plain text reply to the user.
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), GeopinError>;

    /// Sends a text reply carrying a keyboard affordance that asks the
    /// user to share their location.
    async fn request_location(&self, user: UserId, text: &str) -> Result<(), GeopinError>;

    /// Sends a media reply by stored reference, with a caption.
    ///
    /// Fails when the platform can no longer resolve the reference
    /// (expired handle); callers must treat that as a per-item failure.
    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: &str,
    ) -> Result<(), GeopinError>;

    /// Forwards media to the configured archive destination, if any.
    ///
    /// Returns a reference to the forwarded copy, or `Ok(None)` when no
    /// archive destination is configured.
    async fn forward_to_archive(
        &self,
        media: &MediaRef,
        caption: &str,
    ) -> Result<Option<String>, GeopinError>;
}
