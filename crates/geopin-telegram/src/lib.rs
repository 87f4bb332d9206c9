// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the geopin photo archive bot.
//!
//! Implements [`ChannelAdapter`] and [`MessageSink`] for the Telegram Bot
//! API via teloxide: long polling, DM/authorization filtering, the
//! location-request keyboard, photo replies by `file_id`, and best-effort
//! archive forwarding.

pub mod handler;

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ButtonRequest, ChatId, FileId, InputFile, KeyboardButton, KeyboardMarkup, Recipient,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use geopin_config::model::{ArchiveConfig, TelegramConfig};
use geopin_core::error::GeopinError;
use geopin_core::types::{AdapterType, HealthStatus, InboundEvent, MediaRef, UserId};
use geopin_core::{ChannelAdapter, MessageSink, PluginAdapter};

/// Label on the location-request keyboard button.
const SHARE_LOCATION_LABEL: &str = "\u{1F4CD} Share location";

/// Telegram channel adapter.
///
/// Connects to Telegram via long polling, filters messages by chat type
/// and authorization, and exposes the outbound reply surface used by the
/// submission flow.
pub struct TelegramChannel {
    bot: Bot,
    config: TelegramConfig,
    archive: ArchiveConfig,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    inbound_tx: mpsc::Sender<InboundEvent>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: TelegramConfig, archive: ArchiveConfig) -> Result<Self, GeopinError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            GeopinError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(GeopinError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            config,
            archive,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    fn recipient(user: UserId) -> Recipient {
        // In a DM the chat id equals the user id.
        Recipient::Id(ChatId(user.0))
    }

    fn send_error(context: &str, e: teloxide::RequestError) -> GeopinError {
        GeopinError::Channel {
            message: format!("{context}: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        debug!("Telegram channel shutting down");
        // The polling handle is dropped with the channel, which aborts the
        // task. For graceful shutdown, the agent loop stops calling
        // receive() first.
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    async fn connect(&mut self) -> Result<(), GeopinError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let tx = self.inbound_tx.clone();
        let allowed_users: Arc<Vec<String>> = Arc::new(self.config.allowed_users.clone());

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let endpoint = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                let allowed = allowed_users.clone();
                async move {
                    // Filter: DMs only
                    if !handler::is_dm(&msg) {
                        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                        return respond(());
                    }

                    // Filter: authorized users only
                    if !handler::is_authorized(&msg, &allowed) {
                        debug!(chat_id = msg.chat.id.0, "ignoring unauthorized user");
                        return respond(());
                    }

                    let event = handler::extract_event(&msg);
                    match handler::to_inbound_event(&msg, event) {
                        Some(inbound) => {
                            if tx.send(inbound).await.is_err() {
                                warn!("inbound channel closed, dropping message");
                            }
                        }
                        None => {
                            debug!(msg_id = msg.id.0, "ignoring senderless message");
                        }
                    }

                    respond(())
                }
            });

            Dispatcher::builder(bot, endpoint)
                .default_handler(|_| async {}) // Silently ignore non-message updates
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, GeopinError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| GeopinError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}

#[async_trait]
impl MessageSink for TelegramChannel {
    async fn send_text(&self, user: UserId, text: &str) -> Result<(), GeopinError> {
        self.bot
            .send_message(Self::recipient(user), text)
            .await
            .map_err(|e| Self::send_error("failed to send message", e))?;
        Ok(())
    }

    async fn request_location(&self, user: UserId, text: &str) -> Result<(), GeopinError> {
        let button = KeyboardButton::new(SHARE_LOCATION_LABEL).request(ButtonRequest::Location);
        let keyboard = KeyboardMarkup::new([[button]])
            .resize_keyboard()
            .one_time_keyboard();

        self.bot
            .send_message(Self::recipient(user), text)
            .reply_markup(keyboard)
            .await
            .map_err(|e| Self::send_error("failed to send location request", e))?;
        Ok(())
    }

    async fn send_media(
        &self,
        user: UserId,
        media: &MediaRef,
        caption: &str,
    ) -> Result<(), GeopinError> {
        self.bot
            .send_photo(
                Self::recipient(user),
                InputFile::file_id(FileId(media.0.clone())),
            )
            .caption(caption)
            .await
            .map_err(|e| Self::send_error("failed to send photo", e))?;
        Ok(())
    }

    async fn forward_to_archive(
        &self,
        media: &MediaRef,
        caption: &str,
    ) -> Result<Option<String>, GeopinError> {
        let Some(chat_id) = self.archive.chat_id else {
            return Ok(None);
        };

        let sent = self
            .bot
            .send_photo(
                Recipient::Id(ChatId(chat_id)),
                InputFile::file_id(FileId(media.0.clone())),
            )
            .caption(caption)
            .await
            .map_err(|e| Self::send_error("failed to forward photo to archive", e))?;

        debug!(chat_id, message_id = sent.id.0, "photo forwarded to archive");
        Ok(Some(sent.id.0.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
            allowed_users: vec![],
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramChannel::new(make_config(None), ArchiveConfig::default()).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramChannel::new(make_config(Some("")), ArchiveConfig::default()).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let channel = TelegramChannel::new(
            make_config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")),
            ArchiveConfig::default(),
        );
        assert!(channel.is_ok());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = TelegramChannel::new(
            make_config(Some("test:token")),
            ArchiveConfig::default(),
        )
        .unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }

    #[tokio::test]
    async fn forward_without_archive_chat_is_a_noop() {
        let channel = TelegramChannel::new(
            make_config(Some("test:token")),
            ArchiveConfig::default(),
        )
        .unwrap();
        let result = channel
            .forward_to_archive(&MediaRef("f1".to_string()), "caption")
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn recipient_maps_user_to_chat() {
        match TelegramChannel::recipient(UserId(42)) {
            Recipient::Id(chat) => assert_eq!(chat.0, 42),
            other => panic!("expected chat id recipient, got {other:?}"),
        }
    }
}
