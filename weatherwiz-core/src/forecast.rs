use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyPoint, HourlyPoint},
    service::ForecastSource,
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ENDPOINT: &str = "forecast";

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,weather_code,wind_speed_10m,precipitation";
const HOURLY_FIELDS: &str =
    "temperature_2m,weather_code,uv_index,precipitation_probability,wind_speed_10m";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max,precipitation_sum";

/// Current conditions plus the hourly and daily series from one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

/// Client for the Open-Meteo forecast service.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
}

impl ForecastClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<ForecastBundle, WeatherError> {
        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
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

        let parsed: ForecastPayload = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(ENDPOINT, e.to_string()))?;

        shape(parsed)
    }
}

// Only the fields this app consumes; everything else in the payload is
// ignored by serde.
#[derive(Debug, Deserialize)]
struct ForecastPayload {
    current: CurrentPayload,
    hourly: HourlyPayload,
    daily: DailyPayload,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    temperature_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    wind_speed_10m: f64,
    precipitation: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
    wind_speed_10m: Vec<f64>,
    precipitation_probability: Vec<f64>,
    uv_index: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    uv_index_max: Vec<f64>,
    precipitation_sum: Vec<f64>,
}

/// Zip the provider's parallel arrays into domain points.
///
/// Each group's arrays must all match its `time` array in length; a
/// mismatch is reported as malformed rather than truncated or padded.
fn shape(payload: ForecastPayload) -> Result<ForecastBundle, WeatherError> {
    let current = CurrentConditions {
        temperature_c: payload.current.temperature_2m,
        apparent_temperature_c: payload.current.apparent_temperature,
        weather_code: payload.current.weather_code,
        wind_speed_kmh: payload.current.wind_speed_10m,
        precipitation_mm: payload.current.precipitation,
    };

    Ok(ForecastBundle {
        current,
        hourly: shape_hourly(payload.hourly)?,
        daily: shape_daily(payload.daily)?,
    })
}

fn shape_hourly(h: HourlyPayload) -> Result<Vec<HourlyPoint>, WeatherError> {
    let n = h.time.len();
    check_len("hourly.temperature_2m", h.temperature_2m.len(), n)?;
    check_len("hourly.weather_code", h.weather_code.len(), n)?;
    check_len("hourly.wind_speed_10m", h.wind_speed_10m.len(), n)?;
    check_len("hourly.precipitation_probability", h.precipitation_probability.len(), n)?;
    check_len("hourly.uv_index", h.uv_index.len(), n)?;

    h.time
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            Ok(HourlyPoint {
                time: parse_local_datetime(raw)?,
                temperature_c: h.temperature_2m[idx],
                weather_code: h.weather_code[idx],
                wind_speed_kmh: h.wind_speed_10m[idx],
                precipitation_probability: h.precipitation_probability[idx],
                uv_index: h.uv_index[idx],
            })
        })
        .collect()
}

fn shape_daily(d: DailyPayload) -> Result<Vec<DailyPoint>, WeatherError> {
    let n = d.time.len();
    check_len("daily.weather_code", d.weather_code.len(), n)?;
    check_len("daily.temperature_2m_max", d.temperature_2m_max.len(), n)?;
    check_len("daily.temperature_2m_min", d.temperature_2m_min.len(), n)?;
    check_len("daily.sunrise", d.sunrise.len(), n)?;
    check_len("daily.sunset", d.sunset.len(), n)?;
    check_len("daily.uv_index_max", d.uv_index_max.len(), n)?;
    check_len("daily.precipitation_sum", d.precipitation_sum.len(), n)?;

    d.time
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            Ok(DailyPoint {
                date: parse_local_date(raw)?,
                max_temp_c: d.temperature_2m_max[idx],
                min_temp_c: d.temperature_2m_min[idx],
                weather_code: d.weather_code[idx],
                sunrise: parse_local_datetime(&d.sunrise[idx])?,
                sunset: parse_local_datetime(&d.sunset[idx])?,
                uv_index_max: d.uv_index_max[idx],
                precipitation_sum_mm: d.precipitation_sum[idx],
            })
        })
        .collect()
}

fn check_len(field: &str, actual: usize, expected: usize) -> Result<(), WeatherError> {
    if actual == expected {
        Ok(())
    } else {
        Err(WeatherError::malformed(
            ENDPOINT,
            format!("{field} has {actual} entries, expected {expected}"),
        ))
    }
}

/// The provider reports times in the location's local timezone without an
/// offset, e.g. "2024-05-01T13:00".
fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::malformed(ENDPOINT, format!("unparseable timestamp {raw:?}")))
}

fn parse_local_date(raw: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| WeatherError::malformed(ENDPOINT, format!("unparseable date {raw:?}")))
}
