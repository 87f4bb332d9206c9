// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reverse geocoding via the Nominatim HTTP API.
//!
//! Resolution failures never propagate to callers of
//! [`geopin_core::Geocoder::resolve`]: the adapter logs the failure and falls
//! back to a plain `"lat, lon"` string so a submission can always proceed.

pub mod error;
pub mod nominatim;

pub use error::GeocodeFailure;
pub use nominatim::NominatimGeocoder;
