use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A place resolved to coordinates, either by the geocoding client or
/// supplied directly by a caller that already has them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name as reported by the geocoder. May be empty, in
    /// which case outbound requests fall back to `"auto"`.
    pub timezone: String,
}

/// Instantaneous conditions at the time of the request, in metric base
/// units (°C, km/h, mm). Unit conversion is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
    pub precipitation_mm: f64,
}

/// One entry of the hourly series, ascending by time. Timestamps are
/// naive because the provider reports them in the location's local
/// timezone without an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
    pub precipitation_probability: f64,
    pub uv_index: f64,
}

/// One entry of the daily series, ascending by date; index 0 is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub weather_code: i32,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    pub uv_index_max: f64,
    pub precipitation_sum_mm: f64,
}

/// Current air quality, reduced to the first hourly US AQI reading the
/// provider returns. Absent when the provider has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub us_aqi: Option<i32>,
}

/// The full weather snapshot for one city.
///
/// Constructed in one piece by the aggregation service and never mutated;
/// a new search produces a wholly new value. `daily` is non-empty, so
/// index 0 is always usable for today's high/low/UV/sunrise/sunset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
    pub air_quality: AirQuality,
}
