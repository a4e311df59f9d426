use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    forecast::{DEFAULT_FORECAST_DAYS, DEFAULT_FORECAST_URL, MAX_FORECAST_DAYS},
    geocoding::DEFAULT_GEOCODING_URL,
};

pub const GEOCODING_URL_ENV: &str = "CITYWEATHER_GEOCODING_URL";
pub const FORECAST_URL_ENV: &str = "CITYWEATHER_FORECAST_URL";

/// Base URLs of the two upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_geocoding")]
    pub geocoding: String,
    #[serde(default = "default_forecast")]
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: default_geocoding(),
            forecast: default_forecast(),
        }
    }
}

fn default_geocoding() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_forecast() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// forecast_days = 5
///
/// [endpoints]
/// geocoding = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        self.validate()?;
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

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_FORECAST_DAYS).contains(&self.forecast_days),
            "forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
            self.forecast_days
        );
        ensure!(
            !self.endpoints.geocoding.trim().is_empty(),
            "Geocoding endpoint must not be empty"
        );
        ensure!(
            !self.endpoints.forecast.trim().is_empty(),
            "Forecast endpoint must not be empty"
        );
        Ok(())
    }

    /// Apply endpoint overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(GEOCODING_URL_ENV) {
            self.endpoints.geocoding = url;
        }
        if let Some(url) = non_empty(FORECAST_URL_ENV) {
            self.endpoints.forecast = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml_str("").expect("empty config must parse");

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.forecast_days, 5);
        assert_eq!(
            cfg.endpoints.geocoding,
            "https://geocoding-api.open-meteo.com/v1/search"
        );
        assert_eq!(
            cfg.endpoints.forecast,
            "https://api.open-meteo.com/v1/forecast"
        );
    }

    #[test]
    fn partial_endpoints_keep_other_default() {
        let cfg = Config::from_toml_str(
            r#"
            forecast_days = 3

            [endpoints]
            forecast = "http://localhost:8080/v1/forecast"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.forecast_days, 3);
        assert_eq!(cfg.endpoints.forecast, "http://localhost:8080/v1/forecast");
        assert_eq!(cfg.endpoints.geocoding, DEFAULT_GEOCODING_URL);
    }

    #[test]
    fn out_of_range_forecast_days_rejected() {
        let err = Config::from_toml_str("forecast_days = 0").unwrap_err();
        assert!(
            err.to_string()
                .contains("forecast_days must be between 1 and 16")
        );

        assert!(Config::from_toml_str("forecast_days = 17").is_err());
        assert!(Config::from_toml_str("forecast_days = 16").is_ok());
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.endpoints.geocoding = "http://geo.local/search".into();

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn env_overrides_replace_non_empty_values_only() {
        let cfg = Config::default().with_overrides_from(|key| match key {
            GEOCODING_URL_ENV => Some("http://geo.test".into()),
            FORECAST_URL_ENV => Some("  ".into()),
            _ => None,
        });

        assert_eq!(cfg.endpoints.geocoding, "http://geo.test");
        assert_eq!(cfg.endpoints.forecast, DEFAULT_FORECAST_URL);
    }
}
