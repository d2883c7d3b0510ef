// ABOUTME: Configuration for the enrichment HTTP clients
// ABOUTME: Defaults point at the public Photon and Open-Meteo endpoints, overridable via environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enrichment service configuration.

use std::env;

/// Environment variable overriding the reverse-geocoding base URL.
pub const ENV_GEOCODING_URL: &str = "MAPOUT_GEOCODING_URL";
/// Environment variable overriding the weather API base URL.
pub const ENV_WEATHER_URL: &str = "MAPOUT_WEATHER_URL";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MAPOUT_REQUEST_TIMEOUT_SECS";
/// Environment variable disabling enrichment entirely (`false`/`0` to disable).
pub const ENV_ENRICHMENT_ENABLED: &str = "MAPOUT_ENRICHMENT_ENABLED";

/// Settings for the reverse-geocoding and weather lookups.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Base URL of the Photon-compatible reverse geocoder.
    pub geocoding_base_url: String,
    /// Base URL of the Open-Meteo-compatible weather API.
    pub weather_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// When false, enrichment short-circuits to empty results.
    pub enabled: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: "https://photon.komoot.io".into(),
            weather_base_url: "https://api.open-meteo.com".into(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            enabled: true,
        }
    }
}

impl EnrichmentConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            geocoding_base_url: env::var(ENV_GEOCODING_URL)
                .unwrap_or(defaults.geocoding_base_url),
            weather_base_url: env::var(ENV_WEATHER_URL).unwrap_or(defaults.weather_base_url),
            request_timeout_secs: env::var(ENV_REQUEST_TIMEOUT_SECS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            connect_timeout_secs: defaults.connect_timeout_secs,
            enabled: env::var(ENV_ENRICHMENT_ENABLED)
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}
