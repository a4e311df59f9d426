use serde::Serialize;
use thiserror::Error;

/// Every way a weather lookup can fail.
///
/// The `Display` output is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Please provide a valid city name.")]
    Validation,

    #[error("Could not fetch location data. Please try again later.")]
    GeoService,

    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,

    #[error("Could not fetch weather data. Please try again later.")]
    ForecastService,

    #[error("Weather data not available for this location.")]
    DataUnavailable,

    /// The transport failed before a response arrived (DNS, refused connection, ...).
    #[error("{0}")]
    Network(String),

    /// A response arrived but its body was not the expected JSON.
    #[error("{0}")]
    InvalidResponse(String),
}

/// Stable, machine-friendly tag for a [`WeatherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    GeoService,
    CityNotFound,
    ForecastService,
    DataUnavailable,
    Network,
    InvalidResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::GeoService => "geo_service",
            ErrorKind::CityNotFound => "city_not_found",
            ErrorKind::ForecastService => "forecast_service",
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::Network => "network",
            ErrorKind::InvalidResponse => "invalid_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Validation => ErrorKind::Validation,
            WeatherError::GeoService => ErrorKind::GeoService,
            WeatherError::CityNotFound => ErrorKind::CityNotFound,
            WeatherError::ForecastService => ErrorKind::ForecastService,
            WeatherError::DataUnavailable => ErrorKind::DataUnavailable,
            WeatherError::Network(_) => ErrorKind::Network,
            WeatherError::InvalidResponse(_) => ErrorKind::InvalidResponse,
        }
    }
}
