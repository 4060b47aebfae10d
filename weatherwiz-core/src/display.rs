//! Pure display computations over a weather snapshot.
//!
//! Everything here is a function of its explicit inputs: the unit and the
//! clock are always passed in, never read from ambient state, so the same
//! snapshot always renders the same way under test.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::HourlyPoint;

/// Temperature unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    C,
    F,
}

impl TempUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TempUnit::C => "°C",
            TempUnit::F => "°F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TempUnit::C => "Celsius (°C)",
            TempUnit::F => "Fahrenheit (°F)",
        }
    }

    pub const fn all() -> &'static [TempUnit] {
        &[TempUnit::C, TempUnit::F]
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a stored Celsius value for display in the requested unit.
///
/// Conversion happens before rounding, and rounding is half-away-from-zero
/// (what `f64::round` does), applied once per value.
pub fn display_temp(celsius: f64, unit: TempUnit) -> i32 {
    match unit {
        TempUnit::C => celsius.round() as i32,
        TempUnit::F => (celsius * 9.0 / 5.0 + 32.0).round() as i32,
    }
}

/// Window of up to `count` entries starting at the first one not earlier
/// than `now`, falling back to the start of the sequence when every entry
/// is already in the past.
///
/// `now` is expressed in the same local timezone as the series and is a
/// parameter so the window is recomputed fresh by the caller.
pub fn upcoming_hours(hourly: &[HourlyPoint], now: NaiveDateTime, count: usize) -> &[HourlyPoint] {
    let start = hourly.iter().position(|h| h.time >= now).unwrap_or(0);
    let end = (start + count).min(hourly.len());
    &hourly[start..end]
}

/// Weather condition categories mapped from WMO codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    Cloudy,
}

impl Condition {
    /// Total over all codes: anything outside the listed ranges falls to
    /// `Cloudy`, so a renderable icon always exists.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 => Self::Rain,
            71..=77 => Self::Snow,
            80..=82 => Self::RainShowers,
            85..=86 => Self::SnowShowers,
            95..=99 => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::RainShowers => "🌧️",
            Self::SnowShowers => "🌨️",
            Self::Thunderstorm => "⛈️",
            Self::Cloudy => "☁️",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain Showers",
            Self::SnowShowers => "Snow Showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Cloudy => "Cloudy",
        }
    }
}

/// US AQI classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    NotAvailable,
}

impl AqiCategory {
    pub fn from_us_aqi(value: Option<i32>) -> Self {
        match value {
            None => Self::NotAvailable,
            Some(v) if v <= 50 => Self::Good,
            Some(v) if v <= 100 => Self::Moderate,
            Some(_) => Self::Unhealthy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Unhealthy => "Unhealthy",
            Self::NotAvailable => "Not available",
        }
    }
}

/// UV index classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvCategory {
    Low,
    Moderate,
    High,
}

impl UvCategory {
    pub fn from_uv_index(value: f64) -> Self {
        if value <= 2.0 {
            Self::Low
        } else if value <= 5.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hour(day: u32, hour: u32) -> HourlyPoint {
        HourlyPoint {
            time: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature_c: 15.0,
            weather_code: 1,
            wind_speed_kmh: 10.0,
            precipitation_probability: 0.0,
            uv_index: 3.0,
        }
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn display_temp_celsius_rounds() {
        assert_eq!(display_temp(0.0, TempUnit::C), 0);
        assert_eq!(display_temp(100.0, TempUnit::C), 100);
        assert_eq!(display_temp(17.4, TempUnit::C), 17);
        assert_eq!(display_temp(17.5, TempUnit::C), 18);
        assert_eq!(display_temp(-2.5, TempUnit::C), -3);
    }

    #[test]
    fn display_temp_fahrenheit_converts_before_rounding() {
        assert_eq!(display_temp(0.0, TempUnit::F), 32);
        // 37 * 9/5 + 32 = 98.6, rounds to 99, not 98.
        assert_eq!(display_temp(37.0, TempUnit::F), 99);
        assert_eq!(display_temp(100.0, TempUnit::F), 212);
    }

    #[test]
    fn upcoming_hours_starts_at_first_future_entry() {
        let series: Vec<_> = (10..20).map(|h| hour(1, h)).collect();
        let window = upcoming_hours(&series, at(1, 13, 30), 4);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].time, at(1, 14, 0));
        assert_eq!(window[3].time, at(1, 17, 0));
    }

    #[test]
    fn upcoming_hours_matches_exact_timestamp() {
        let series: Vec<_> = (10..20).map(|h| hour(1, h)).collect();
        let window = upcoming_hours(&series, at(1, 14, 0), 2);
        assert_eq!(window[0].time, at(1, 14, 0));
    }

    #[test]
    fn upcoming_hours_falls_back_to_start_when_all_past() {
        let series: Vec<_> = (10..20).map(|h| hour(1, h)).collect();
        let window = upcoming_hours(&series, at(2, 8, 0), 8);
        assert_eq!(window.len(), 8);
        assert_eq!(window[0].time, at(1, 10, 0));
    }

    #[test]
    fn upcoming_hours_with_fully_future_series_starts_at_zero() {
        let series: Vec<_> = (10..20).map(|h| hour(2, h)).collect();
        let window = upcoming_hours(&series, at(1, 23, 0), 8);
        assert_eq!(window.len(), 8);
        assert_eq!(window[0].time, at(2, 10, 0));
    }

    #[test]
    fn upcoming_hours_is_clamped_to_series_length() {
        let series: Vec<_> = (10..13).map(|h| hour(1, h)).collect();
        let window = upcoming_hours(&series, at(1, 11, 0), 8);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn wmo_code_mapping_covers_listed_ranges() {
        assert_eq!(Condition::from_wmo_code(0), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(2), Condition::PartlyCloudy);
        assert_eq!(Condition::from_wmo_code(45), Condition::Fog);
        assert_eq!(Condition::from_wmo_code(55), Condition::Drizzle);
        assert_eq!(Condition::from_wmo_code(61), Condition::Rain);
        assert_eq!(Condition::from_wmo_code(75), Condition::Snow);
        assert_eq!(Condition::from_wmo_code(81), Condition::RainShowers);
        assert_eq!(Condition::from_wmo_code(86), Condition::SnowShowers);
        assert_eq!(Condition::from_wmo_code(95), Condition::Thunderstorm);
    }

    #[test]
    fn wmo_code_mapping_is_total() {
        assert_eq!(Condition::from_wmo_code(9999), Condition::Cloudy);
        assert_eq!(Condition::from_wmo_code(-1), Condition::Cloudy);
        assert_eq!(Condition::from_wmo_code(4), Condition::Cloudy);
    }

    #[test]
    fn aqi_bands() {
        assert_eq!(AqiCategory::from_us_aqi(Some(40)), AqiCategory::Good);
        assert_eq!(AqiCategory::from_us_aqi(Some(50)), AqiCategory::Good);
        assert_eq!(AqiCategory::from_us_aqi(Some(75)), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_us_aqi(Some(100)), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_us_aqi(Some(150)), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_us_aqi(None), AqiCategory::NotAvailable);
        assert_eq!(AqiCategory::from_us_aqi(None).label(), "Not available");
    }

    #[test]
    fn uv_bands() {
        assert_eq!(UvCategory::from_uv_index(1.0), UvCategory::Low);
        assert_eq!(UvCategory::from_uv_index(2.0), UvCategory::Low);
        assert_eq!(UvCategory::from_uv_index(4.4), UvCategory::Moderate);
        assert_eq!(UvCategory::from_uv_index(5.0), UvCategory::Moderate);
        assert_eq!(UvCategory::from_uv_index(5.1), UvCategory::High);
    }
}
