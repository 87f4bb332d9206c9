// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nominatim reverse-geocoding client.
//!
//! Talks to a Nominatim `/reverse` endpoint with `format=json` and extracts
//! the `display_name` field. The public entry point is the
//! [`geopin_core::Geocoder`] impl, which degrades to coordinates on failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use geopin_config::model::GeocoderConfig;
use geopin_core::types::Coordinates;
use geopin_core::{AdapterType, Geocoder, GeopinError, HealthStatus, PluginAdapter};

use crate::error::GeocodeFailure;

/// The subset of a Nominatim reverse response we care about.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Reverse geocoder backed by a Nominatim HTTP endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl NominatimGeocoder {
    /// Creates a geocoder with a pooled HTTP client.
    ///
    /// The configured User-Agent is mandatory: Nominatim's usage policy
    /// rejects anonymous clients.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeopinError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeopinError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// One lookup attempt against the configured endpoint.
    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeFailure> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("format", "json".to_string()),
                ("accept-language", self.config.language.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeFailure::Timeout
                } else {
                    GeocodeFailure::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeFailure::BadStatus(status));
        }

        let body: ReverseResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GeocodeFailure::Timeout
            } else {
                GeocodeFailure::Parse(e)
            }
        })?;

        body.display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(GeocodeFailure::MissingField)
    }
}

#[async_trait]
impl PluginAdapter for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Geocoder
    }

    async fn health_check(&self) -> Result<HealthStatus, GeopinError> {
        // The client is stateless; reachability is only known per-lookup.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GeopinError> {
        Ok(())
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, coords: Coordinates) -> String {
        match self.lookup(coords).await {
            Ok(address) => {
                debug!(lat = coords.lat, lon = coords.lon, "address resolved");
                address
            }
            Err(failure) => {
                warn!(
                    lat = coords.lat,
                    lon = coords.lon,
                    error = %failure,
                    "reverse geocoding failed, falling back to coordinates"
                );
                format!("{}, {}", coords.lat, coords.lon)
            }
        }
    }
}
