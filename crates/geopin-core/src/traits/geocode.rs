// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geocoder adapter trait for coordinate-to-address resolution.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::Coordinates;

/// Adapter for reverse geocoding.
#[async_trait]
pub trait Geocoder: PluginAdapter {
    /// Resolves coordinates to a display address.
    ///
    /// Never fails outward: implementations degrade to a formatted
    /// coordinate string (`"<lat>, <lon>"`) on any lookup failure, so the
    /// returned string is always non-empty and usable as an address.
    async fn resolve(&self, coords: Coordinates) -> String;
}
