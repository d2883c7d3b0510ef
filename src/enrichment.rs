// ABOUTME: Best-effort workout enrichment via reverse geocoding and current-weather lookup
// ABOUTME: Two independent HTTP lookups joined concurrently, each degrading to None on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enrichment service.
//!
//! For a workout's representative coordinate, fetch a human-readable place
//! (Photon reverse geocoding) and the current weather classification code
//! (Open-Meteo) concurrently. The call as a whole never fails: each field is
//! individually optional, a failed lookup simply leaves it unset. There is
//! no retry; one degraded attempt still commits the workout.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::EnrichmentConfig;

/// Optional fields an enrichment attempt can contribute to a workout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Precise place string (street, falling back to county).
    pub location_primary: Option<String>,
    /// Coarse place string (first word of the region, falling back to
    /// country).
    pub location_secondary: Option<String>,
    /// WMO current-weather classification code.
    pub weather_code: Option<u8>,
}

/// The enrichment seam the controller depends on; fakes implement this in
/// tests.
#[async_trait]
pub trait Enricher {
    /// Best-effort enrichment of a coordinate. Infallible by contract:
    /// failures yield `None` fields.
    async fn enrich(&self, lat: f64, lng: f64) -> Enrichment;
}

/// Failure of a single lookup; absorbed into `None` fields by the enricher.
#[derive(Debug, Error)]
enum LookupError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("response carried no usable data")]
    Empty,
}

/// Reverse geocoding + weather lookups over HTTP.
pub struct HttpEnricher {
    client: Client,
    config: EnrichmentConfig,
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    properties: PhotonProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PhotonProperties {
    street: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weathercode: u8,
}

impl HttpEnricher {
    /// Build an enricher from configuration.
    #[must_use]
    pub fn new(config: EnrichmentConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build enrichment HTTP client, using default");
                Client::new()
            });
        Self { client, config }
    }

    /// Enricher against the public Photon and Open-Meteo endpoints.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(EnrichmentConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    #[instrument(skip(self), fields(service = "photon", lat = %lat, lon = %lng))]
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<PhotonProperties, LookupError> {
        let url = format!(
            "{}/reverse?lon={lng}&lat={lat}",
            self.config.geocoding_base_url
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }
        let body: PhotonResponse = response.json().await?;
        body.features
            .into_iter()
            .next()
            .map(|f| f.properties)
            .ok_or(LookupError::Empty)
    }

    #[instrument(skip(self), fields(service = "open-meteo", lat = %lat, lon = %lng))]
    async fn current_weather(&self, lat: f64, lng: f64) -> Result<u8, LookupError> {
        let url = format!(
            "{}/v1/forecast?latitude={lat}&longitude={lng}&current_weather=true",
            self.config.weather_base_url
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }
        let body: OpenMeteoResponse = response.json().await?;
        Ok(body.current_weather.weathercode)
    }
}

#[async_trait]
impl Enricher for HttpEnricher {
    async fn enrich(&self, lat: f64, lng: f64) -> Enrichment {
        if !self.config.enabled {
            debug!("enrichment disabled, skipping lookups");
            return Enrichment::default();
        }

        let (place, weather) = tokio::join!(
            self.reverse_geocode(lat, lng),
            self.current_weather(lat, lng)
        );

        let (location_primary, location_secondary) = match place {
            Ok(properties) => place_strings(properties),
            Err(e) => {
                warn!(error = %e, "reverse geocoding failed, location left unset");
                (None, None)
            }
        };

        let weather_code = match weather {
            Ok(code) => Some(code),
            Err(e) => {
                warn!(error = %e, "weather lookup failed, code left unset");
                None
            }
        };

        Enrichment {
            location_primary,
            location_secondary,
            weather_code,
        }
    }
}

/// Field fallbacks for the geocoded place: street falls back to county,
/// the region's first word falls back to the country.
fn place_strings(properties: PhotonProperties) -> (Option<String>, Option<String>) {
    let primary = properties.street.or(properties.county);
    let secondary = properties
        .state
        .as_deref()
        .and_then(|s| s.split_whitespace().next())
        .map(ToOwned::to_owned)
        .or(properties.country);
    (primary, secondary)
}
