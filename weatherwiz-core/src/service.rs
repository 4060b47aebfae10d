use async_trait::async_trait;

use crate::{
    air_quality::AirQualityClient,
    error::WeatherError,
    forecast::{ForecastBundle, ForecastClient},
    model::{AirQuality, CityWeather, Location},
};

/// Timezone parameter used when a location does not carry one.
const AUTO_TIMEZONE: &str = "auto";

/// Source of forecast data for a coordinate pair.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<ForecastBundle, WeatherError>;
}

/// Source of air quality data for a coordinate pair.
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<AirQuality, WeatherError>;
}

/// Joins the forecast and air quality lookups into one snapshot.
///
/// The service keeps no state between calls; every `fetch_weather`
/// produces an independent `CityWeather` value.
pub struct WeatherService {
    forecast: Box<dyn ForecastSource>,
    air_quality: Box<dyn AirQualitySource>,
}

impl WeatherService {
    /// Service backed by the real Open-Meteo clients.
    pub fn new() -> Self {
        Self {
            forecast: Box::new(ForecastClient::new()),
            air_quality: Box::new(AirQualityClient::new()),
        }
    }

    /// Service with explicit sources; used by tests to drive the join
    /// deterministically.
    pub fn with_sources(
        forecast: Box<dyn ForecastSource>,
        air_quality: Box<dyn AirQualitySource>,
    ) -> Self {
        Self { forecast, air_quality }
    }

    /// Fetch and join both lookups for `location`.
    ///
    /// Both requests go out concurrently and either failure fails the
    /// whole call; a partial snapshot is never returned. The snapshot
    /// carries the caller's `location` verbatim, not one re-derived from
    /// the forecast response.
    pub async fn fetch_weather(&self, location: &Location) -> Result<CityWeather, WeatherError> {
        let timezone = if location.timezone.is_empty() {
            AUTO_TIMEZONE
        } else {
            location.timezone.as_str()
        };

        tracing::debug!(
            "fetching weather for {} ({}, {})",
            location.name,
            location.latitude,
            location.longitude
        );

        let (bundle, air_quality) = tokio::try_join!(
            self.forecast.fetch(location.latitude, location.longitude, timezone),
            self.air_quality.fetch(location.latitude, location.longitude, timezone),
        )?;

        // Index 0 of `daily` backs today's high/low/UV/sunrise/sunset.
        if bundle.daily.is_empty() {
            return Err(WeatherError::malformed("forecast", "daily series is empty"));
        }

        Ok(CityWeather {
            location: location.clone(),
            current: bundle.current,
            hourly: bundle.hourly,
            daily: bundle.daily,
            air_quality,
        })
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailyPoint};
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use std::sync::{Arc, Mutex};

    /// Deterministic in-memory forecast source. The response is consumed
    /// on first call; the timezone it was asked for is recorded.
    struct StubForecast {
        response: Mutex<Option<Result<ForecastBundle, WeatherError>>>,
        seen_timezone: Arc<Mutex<Option<String>>>,
    }

    #[async_trait]
    impl ForecastSource for StubForecast {
        async fn fetch(
            &self,
            _latitude: f64,
            _longitude: f64,
            timezone: &str,
        ) -> Result<ForecastBundle, WeatherError> {
            *self.seen_timezone.lock().unwrap() = Some(timezone.to_string());
            self.response.lock().unwrap().take().expect("stub called once")
        }
    }

    struct StubAirQuality {
        response: Mutex<Option<Result<AirQuality, WeatherError>>>,
        seen_timezone: Arc<Mutex<Option<String>>>,
    }

    #[async_trait]
    impl AirQualitySource for StubAirQuality {
        async fn fetch(
            &self,
            _latitude: f64,
            _longitude: f64,
            timezone: &str,
        ) -> Result<AirQuality, WeatherError> {
            *self.seen_timezone.lock().unwrap() = Some(timezone.to_string());
            self.response.lock().unwrap().take().expect("stub called once")
        }
    }

    fn location(timezone: &str) -> Location {
        Location {
            name: "Calgary".to_string(),
            country: "Canada".to_string(),
            latitude: 51.05,
            longitude: -114.07,
            timezone: timezone.to_string(),
        }
    }

    fn bundle() -> ForecastBundle {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ForecastBundle {
            current: CurrentConditions {
                temperature_c: 11.2,
                apparent_temperature_c: 9.8,
                weather_code: 3,
                wind_speed_kmh: 18.0,
                precipitation_mm: 0.0,
            },
            hourly: Vec::new(),
            daily: vec![DailyPoint {
                date,
                max_temp_c: 14.0,
                min_temp_c: 2.5,
                weather_code: 3,
                sunrise: date.and_hms_opt(6, 4, 0).unwrap(),
                sunset: date.and_hms_opt(20, 55, 0).unwrap(),
                uv_index_max: 5.2,
                precipitation_sum_mm: 0.3,
            }],
        }
    }

    fn service_with(
        forecast: Result<ForecastBundle, WeatherError>,
        air: Result<AirQuality, WeatherError>,
    ) -> (WeatherService, Arc<Mutex<Option<String>>>, Arc<Mutex<Option<String>>>) {
        let forecast_tz = Arc::new(Mutex::new(None));
        let air_tz = Arc::new(Mutex::new(None));
        let service = WeatherService::with_sources(
            Box::new(StubForecast {
                response: Mutex::new(Some(forecast)),
                seen_timezone: Arc::clone(&forecast_tz),
            }),
            Box::new(StubAirQuality {
                response: Mutex::new(Some(air)),
                seen_timezone: Arc::clone(&air_tz),
            }),
        );
        (service, forecast_tz, air_tz)
    }

    #[tokio::test]
    async fn join_returns_full_snapshot_with_caller_location() {
        let loc = location("America/Edmonton");
        let (service, _, _) = service_with(Ok(bundle()), Ok(AirQuality { us_aqi: Some(42) }));

        let weather = service.fetch_weather(&loc).await.unwrap();

        assert_eq!(weather.location, loc);
        assert_eq!(weather.current, bundle().current);
        assert_eq!(weather.daily, bundle().daily);
        assert_eq!(weather.air_quality.us_aqi, Some(42));
    }

    #[tokio::test]
    async fn air_quality_failure_fails_the_whole_fetch() {
        let (service, _, _) = service_with(
            Ok(bundle()),
            Err(WeatherError::Status {
                endpoint: "air quality",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            }),
        );

        let err = service.fetch_weather(&location("auto")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Status { .. }));
    }

    #[tokio::test]
    async fn forecast_failure_fails_the_whole_fetch() {
        let (service, _, _) = service_with(
            Err(WeatherError::Malformed {
                endpoint: "forecast",
                detail: "missing hourly".to_string(),
            }),
            Ok(AirQuality { us_aqi: None }),
        );

        let err = service.fetch_weather(&location("auto")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Malformed { .. }));
    }

    #[tokio::test]
    async fn empty_timezone_falls_back_to_auto_for_both_requests() {
        let (service, forecast_tz, air_tz) =
            service_with(Ok(bundle()), Ok(AirQuality { us_aqi: None }));

        service.fetch_weather(&location("")).await.unwrap();

        assert_eq!(forecast_tz.lock().unwrap().as_deref(), Some("auto"));
        assert_eq!(air_tz.lock().unwrap().as_deref(), Some("auto"));
    }

    #[tokio::test]
    async fn explicit_timezone_is_passed_through() {
        let (service, forecast_tz, air_tz) =
            service_with(Ok(bundle()), Ok(AirQuality { us_aqi: None }));

        service.fetch_weather(&location("Europe/London")).await.unwrap();

        assert_eq!(forecast_tz.lock().unwrap().as_deref(), Some("Europe/London"));
        assert_eq!(air_tz.lock().unwrap().as_deref(), Some("Europe/London"));
    }

    #[tokio::test]
    async fn empty_daily_series_is_malformed() {
        let mut empty = bundle();
        empty.daily.clear();
        let (service, _, _) = service_with(Ok(empty), Ok(AirQuality { us_aqi: None }));

        let err = service.fetch_weather(&location("auto")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Malformed { .. }));
    }
}
