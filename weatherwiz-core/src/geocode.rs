use reqwest::Client;
use serde::Deserialize;

use crate::{error::WeatherError, model::Location};

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const ENDPOINT: &str = "geocoding";

/// Client for the Open-Meteo geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Resolve a free-text city name to the first matching location.
    ///
    /// Empty or whitespace-only input short-circuits to `Ok(None)` without
    /// touching the network. Zero matches is also `Ok(None)`, not an
    /// error; the caller decides how to present it.
    pub async fn resolve(&self, name: &str) -> Result<Option<Location>, WeatherError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        tracing::debug!("geocoding {name:?}");

        let res = self
            .http
            .get(GEOCODE_URL)
            .query(&[("name", name), ("count", "1"), ("language", "en")])
            .send()
            .await
            .map_err(|e| WeatherError::network(ENDPOINT, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::network(ENDPOINT, e))?;

        if !status.is_success() {
            return Err(WeatherError::status(ENDPOINT, status, &body));
        }

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(ENDPOINT, e.to_string()))?;

        Ok(first_match(parsed))
    }
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    /// Omitted entirely by the provider when nothing matched.
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: String,
    #[serde(default)]
    timezone: String,
}

/// First candidate wins; there is no disambiguation step.
fn first_match(response: GeoResponse) -> Option<Location> {
    let city = response.results.into_iter().next()?;
    Some(Location {
        name: city.name,
        country: city.country,
        latitude: city.latitude,
        longitude: city.longitude,
        timezone: city.timezone,
    })
}
