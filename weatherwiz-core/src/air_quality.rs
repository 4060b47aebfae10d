use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::WeatherError, model::AirQuality, service::AirQualitySource};

const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
const ENDPOINT: &str = "air quality";

/// Client for the Open-Meteo air quality service.
#[derive(Debug, Clone)]
pub struct AirQualityClient {
    http: Client,
}

impl AirQualityClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

impl Default for AirQualityClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AirQualitySource for AirQualityClient {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<AirQuality, WeatherError> {
        let res = self
            .http
            .get(AIR_QUALITY_URL)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", "us_aqi".to_string()),
                ("timezone", timezone.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::network(ENDPOINT, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::network(ENDPOINT, e))?;

        if !status.is_success() {
            return Err(WeatherError::status(ENDPOINT, status, &body));
        }

        let parsed: AirQualityPayload = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(ENDPOINT, e.to_string()))?;

        Ok(first_reading(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct AirQualityPayload {
    #[serde(default)]
    hourly: Option<AirHourly>,
}

#[derive(Debug, Deserialize)]
struct AirHourly {
    /// Individual readings can be null at the edges of the series.
    #[serde(default)]
    us_aqi: Vec<Option<i32>>,
}

/// The first hourly reading stands in for "current". A missing group, an
/// empty series, or a null leading value all mean "not available" rather
/// than an error.
fn first_reading(payload: AirQualityPayload) -> AirQuality {
    let us_aqi = payload.hourly.and_then(|h| h.us_aqi.first().copied()).flatten();
    AirQuality { us_aqi }
}
