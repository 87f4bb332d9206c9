// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure modes of a single reverse-geocoding lookup.

use thiserror::Error;

/// Why a lookup did not produce an address.
///
/// These never cross the [`geopin_core::Geocoder`] boundary; they exist so
/// the adapter can log what went wrong before falling back to coordinates.
#[derive(Debug, Error)]
pub enum GeocodeFailure {
    /// The request did not complete within the configured timeout.
    #[error("lookup timed out")]
    Timeout,

    /// Connection, DNS, or TLS failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {0}")]
    BadStatus(reqwest::StatusCode),

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Parse(#[source] reqwest::Error),

    /// The response parsed but carried no `display_name`.
    #[error("response has no display_name field")]
    MissingField,
}
