use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::display::TempUnit;

/// Visual theme of the app chrome.
///
/// Terminal output does not style itself, but the preference is stored
/// and surfaced so the settings flow mirrors the app's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Purple,
    Light,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Purple => "Purple",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub const fn all() -> &'static [Theme] {
        &[Theme::Purple, Theme::Light, Theme::Dark]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User preferences stored on disk.
///
/// Service endpoints are fixed constants in the clients; the only
/// configuration this app carries is how to present a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub unit: TempUnit,

    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    /// Load preferences from disk, or return defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save preferences to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherwiz", "weatherwiz")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_celsius_and_purple() {
        let cfg = Config::default();
        assert_eq!(cfg.unit, TempUnit::C);
        assert_eq!(cfg.theme, Theme::Purple);
    }

    #[test]
    fn preferences_roundtrip_through_toml() {
        let cfg = Config { unit: TempUnit::F, theme: Theme::Dark };

        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn fields_are_stored_lowercase() {
        let parsed: Config = toml::from_str("unit = \"f\"\ntheme = \"dark\"\n").unwrap();
        assert_eq!(parsed.unit, TempUnit::F);
        assert_eq!(parsed.theme, Theme::Dark);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("unit = \"f\"\n").unwrap();
        assert_eq!(parsed.unit, TempUnit::F);
        assert_eq!(parsed.theme, Theme::Purple);
    }
}
