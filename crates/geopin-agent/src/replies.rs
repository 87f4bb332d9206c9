// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing reply strings, collected in one place.

pub const START: &str =
    "Hi! Share a location, then send a photo taken there.\n\
     /recent shows the latest photos, /search finds them by address.";

pub const NEED_LOCATION: &str = "Send a location first!";

pub const GUIDANCE: &str = "Please send a location or a photo.";

pub const SAVE_FAILED: &str =
    "Could not save the photo, please try sending it again.";

pub const ARCHIVE_EMPTY: &str = "The archive is empty.";

pub const NOTHING_FOUND: &str = "Nothing found.";

pub const SEARCH_USAGE: &str = "Usage: /search <part of an address>";

pub const LISTING_FAILED: &str = "Could not read the archive, try again later.";

pub fn location_stored(address: &str) -> String {
    format!("Address:\n{address}\nNow send a photo.")
}

pub fn saved(address: &str) -> String {
    format!("Saved!\n\u{1F4CD} {address}")
}

pub fn caption(address: &str) -> String {
    format!("\u{1F4CD} {address}")
}

pub fn media_unavailable(address: &str) -> String {
    format!("Photo unavailable: {address}")
}
