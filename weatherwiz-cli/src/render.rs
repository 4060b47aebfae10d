//! Terminal rendering of a `CityWeather` snapshot: header, the next-hours
//! strip, the detail widgets and the weekly list.

use chrono::{Local, NaiveDateTime};
use weatherwiz_core::{
    CityWeather,
    display::{self, AqiCategory, Condition, TempUnit, UvCategory},
};

/// Number of entries in the next-hours strip.
const UPCOMING_HOURS: usize = 8;

pub fn print_city_weather(weather: &CityWeather, unit: TempUnit) {
    let current = &weather.current;
    // The aggregation service guarantees a non-empty daily series.
    let today = &weather.daily[0];

    println!();
    println!("{}", weather.location.name);
    if !weather.location.country.is_empty() {
        println!("{}", weather.location.country);
    }
    println!();
    println!(
        "{}°  Feels like {}°",
        display::display_temp(current.temperature_c, unit),
        display::display_temp(current.apparent_temperature_c, unit),
    );
    println!(
        "H: {}° · L: {}°",
        display::display_temp(today.max_temp_c, unit),
        display::display_temp(today.min_temp_c, unit),
    );

    println!();
    println!("Hourly Forecast");
    let now = Local::now().naive_local();
    for (idx, point) in display::upcoming_hours(&weather.hourly, now, UPCOMING_HOURS)
        .iter()
        .enumerate()
    {
        println!(
            "  {:<6} {}  {}°",
            hour_label(idx, point.time),
            Condition::from_wmo_code(point.weather_code).icon(),
            display::display_temp(point.temperature_c, unit),
        );
    }

    println!();
    println!("Air Quality: {}", air_quality_line(weather.air_quality.us_aqi));
    println!(
        "UV Index: {} – {}",
        today.uv_index_max.round() as i64,
        UvCategory::from_uv_index(today.uv_index_max).label(),
    );
    println!("Sunrise: {} · Sunset: {}", clock(today.sunrise), clock(today.sunset));
    println!("Wind: {} km/h", current.wind_speed_kmh.round() as i64);
    println!("Rainfall: {:.1} mm today", today.precipitation_sum_mm);

    println!();
    println!("Weekly Forecast");
    for day in &weather.daily {
        println!(
            "  {}  {:>3}° / {:>3}°  {}",
            day.date.format("%a"),
            display::display_temp(day.max_temp_c, unit),
            display::display_temp(day.min_temp_c, unit),
            Condition::from_wmo_code(day.weather_code).icon(),
        );
    }
    println!();
}

/// The first card of the strip is "Now"; the rest show the clock hour.
fn hour_label(idx: usize, time: NaiveDateTime) -> String {
    if idx == 0 {
        "Now".to_string()
    } else {
        time.format("%l %p").to_string().trim_start().to_string()
    }
}

fn clock(time: NaiveDateTime) -> String {
    time.format("%l:%M %p").to_string().trim_start().to_string()
}

fn air_quality_line(us_aqi: Option<i32>) -> String {
    match us_aqi {
        Some(value) => format!("{value} – {}", AqiCategory::from_us_aqi(Some(value)).label()),
        None => AqiCategory::NotAvailable.label().to_string(),
    }
}
