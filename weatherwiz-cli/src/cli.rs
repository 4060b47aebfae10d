use std::fmt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use weatherwiz_core::{
    CityWeather, Config, GeocodingClient, Location, TempUnit, Theme, WeatherService,
};

use crate::recent::RecentSearches;
use crate::render;

/// Cities offered on the home menu before anything has been searched.
const SUGGESTED_CITIES: &[&str] = &["Calgary", "London", "Delhi"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherwiz", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current, hourly and weekly weather for a city.
    Show {
        /// City name to search for.
        city: String,

        /// Temperature unit override for this invocation.
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },

    /// Choose temperature unit and theme preferences.
    Configure,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum UnitArg {
    C,
    F,
}

impl From<UnitArg> for TempUnit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::C => TempUnit::C,
            UnitArg::F => TempUnit::F,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Show { city, unit }) => show(&city, unit.map(Into::into)).await,
            Some(Command::Configure) => configure(),
            None => home().await,
        }
    }
}

/// One-shot lookup: search, fetch, render.
async fn show(city: &str, unit_override: Option<TempUnit>) -> Result<()> {
    let config = Config::load()?;
    let unit = unit_override.unwrap_or(config.unit);

    let geocoder = GeocodingClient::new();
    let service = WeatherService::new();

    match lookup(&geocoder, &service, city).await? {
        Some(weather) => render::print_city_weather(&weather, unit),
        None => println!("City not found. Try another city name."),
    }

    Ok(())
}

/// Resolve a name and fetch its snapshot. `Ok(None)` means no matching
/// city; errors carry the user-facing message as context.
async fn lookup(
    geocoder: &GeocodingClient,
    service: &WeatherService,
    city: &str,
) -> Result<Option<CityWeather>> {
    let Some(location) = geocoder
        .resolve(city)
        .await
        .context("Unable to search for this city right now")?
    else {
        return Ok(None);
    };

    let weather = service
        .fetch_weather(&location)
        .await
        .context("Could not load weather data")?;

    Ok(Some(weather))
}

enum HomeChoice {
    Search,
    Recent(Location),
    Suggested(&'static str),
    Settings,
    Quit,
}

impl fmt::Display for HomeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeChoice::Search => f.write_str("Search for a city"),
            HomeChoice::Recent(location) if location.country.is_empty() => {
                f.write_str(&location.name)
            }
            HomeChoice::Recent(location) => write!(f, "{}, {}", location.name, location.country),
            HomeChoice::Suggested(name) => f.write_str(name),
            HomeChoice::Settings => f.write_str("Settings"),
            HomeChoice::Quit => f.write_str("Quit"),
        }
    }
}

/// Interactive home: pick a recent or suggested city, or type a query.
/// Lookups run to completion before the next prompt, so a later search
/// can never be overtaken by an earlier one.
async fn home() -> Result<()> {
    let mut config = Config::load()?;
    let geocoder = GeocodingClient::new();
    let service = WeatherService::new();
    let mut recents = RecentSearches::default();

    loop {
        let mut choices = vec![HomeChoice::Search];
        if recents.is_empty() {
            choices.extend(SUGGESTED_CITIES.iter().copied().map(HomeChoice::Suggested));
        } else {
            choices.extend(recents.cities().iter().cloned().map(HomeChoice::Recent));
        }
        choices.push(HomeChoice::Settings);
        choices.push(HomeChoice::Quit);

        let choice = match Select::new("WeatherWiz", choices).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let result = match choice {
            HomeChoice::Quit => break,
            HomeChoice::Settings => {
                configure()?;
                config = Config::load()?;
                continue;
            }
            HomeChoice::Search => {
                let query = match Text::new("Search for a city").prompt() {
                    Ok(query) => query,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                lookup(&geocoder, &service, &query).await
            }
            HomeChoice::Suggested(name) => lookup(&geocoder, &service, name).await,
            HomeChoice::Recent(location) => {
                // Coordinates are already resolved; skip the geocoder.
                service
                    .fetch_weather(&location)
                    .await
                    .map(Some)
                    .context("Could not load weather data")
            }
        };

        match result {
            Ok(Some(weather)) => {
                render::print_city_weather(&weather, config.unit);
                recents.push(weather.location.clone());
            }
            Ok(None) => println!("City not found. Try another city name."),
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}

/// Interactive preference selection, persisted to the config file.
fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let units = TempUnit::all().to_vec();
    let start = units.iter().position(|unit| *unit == config.unit).unwrap_or(0);
    config.unit = Select::new("Temperature unit", units)
        .with_starting_cursor(start)
        .prompt()?;

    let themes = Theme::all().to_vec();
    let start = themes.iter().position(|theme| *theme == config.theme).unwrap_or(0);
    config.theme = Select::new("Theme", themes)
        .with_starting_cursor(start)
        .prompt()?;

    config.save()?;
    println!("Saved preferences to {}", Config::config_file_path()?.display());

    Ok(())
}
