// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routing, authorization filtering, and event extraction.
//!
//! Determines whether an incoming Telegram message should be processed
//! based on authorization rules and chat type, then classifies it into a
//! channel-agnostic [`UserEvent`].

use teloxide::prelude::*;
use teloxide::types::ChatKind;

use geopin_core::types::{
    Coordinates, InboundEvent, MediaRef, SubmissionEvent, UserEvent, UserId,
};

/// Checks whether the message sender is authorized.
///
/// Authorization passes if the sender's user ID (as string) or username
/// matches any entry in the `allowed_users` list. An empty list leaves the
/// bot open to everyone.
///
/// Messages without a sender (e.g., channel posts) always return `false`.
pub fn is_authorized(msg: &Message, allowed_users: &[String]) -> bool {
    let user = match msg.from.as_ref() {
        Some(u) => u,
        None => return false,
    };

    if allowed_users.is_empty() {
        return true;
    }

    let user_id_str = user.id.0.to_string();

    for allowed in allowed_users {
        // Match by user ID
        if *allowed == user_id_str {
            return true;
        }
        // Match by username (with or without @ prefix)
        if let Some(ref username) = user.username {
            let allowed_clean = allowed.strip_prefix('@').unwrap_or(allowed);
            if username.eq_ignore_ascii_case(allowed_clean) {
                return true;
            }
        }
    }

    false
}

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Classifies a text message into a user event.
///
/// Commands may carry a `@botname` suffix (`/search@geopin_bot query`).
/// Unknown commands and plain text both land in `Other` so the flow can
/// reply with guidance.
pub fn parse_text(text: &str) -> UserEvent {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return UserEvent::Submission(SubmissionEvent::Other);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let command = command.split('@').next().unwrap_or(command);
    let argument = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

    match command {
        "/start" => UserEvent::Submission(SubmissionEvent::Start),
        "/recent" => UserEvent::Recent,
        "/search" => UserEvent::Search(argument.map(str::to_string)),
        _ => UserEvent::Submission(SubmissionEvent::Other),
    }
}

/// Classifies a Telegram message into a user event.
///
/// Photos use the largest available size variant; Telegram lists variants
/// smallest first.
pub fn extract_event(msg: &Message) -> UserEvent {
    if let Some(text) = msg.text() {
        return parse_text(text);
    }

    if let Some(location) = msg.location() {
        return UserEvent::Submission(SubmissionEvent::Location(Coordinates {
            lat: location.latitude,
            lon: location.longitude,
        }));
    }

    if let Some(photos) = msg.photo()
        && let Some(largest) = photos.last()
    {
        return UserEvent::Submission(SubmissionEvent::Photo(MediaRef(
            largest.file.id.0.clone(),
        )));
    }

    // Stickers, voice, documents, ... get the guidance reply.
    UserEvent::Submission(SubmissionEvent::Other)
}

/// Pairs an extracted event with its sender. `None` for messages without one.
pub fn to_inbound_event(msg: &Message, event: UserEvent) -> Option<InboundEvent> {
    let user = msg.from.as_ref()?;
    Some(InboundEvent {
        user_id: UserId(user.id.0 as i64),
        event,
    })
}
