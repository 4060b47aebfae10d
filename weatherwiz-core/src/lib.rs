//! Core library for the `weatherwiz` CLI.
//!
//! This crate defines:
//! - The domain model for a city weather snapshot
//! - Clients for the geocoding, forecast and air quality services
//! - The aggregation service that joins the two weather lookups
//! - Pure display computations (unit conversion, icon mapping, categories)
//! - User preference handling
//!
//! It is used by `weatherwiz-cli`, but can also be reused by other binaries or services.

pub mod air_quality;
pub mod config;
pub mod display;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod service;

pub use config::{Config, Theme};
pub use display::TempUnit;
pub use error::WeatherError;
pub use geocode::GeocodingClient;
pub use model::{AirQuality, CityWeather, CurrentConditions, DailyPoint, HourlyPoint, Location};
pub use service::{AirQualitySource, ForecastSource, WeatherService};
