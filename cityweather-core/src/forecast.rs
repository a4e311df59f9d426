use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::{
    error::WeatherError,
    http::HttpClient,
    model::{CurrentConditions, DailySeries, ForecastData},
};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_FORECAST_DAYS: u8 = 5;
/// Upper bound accepted by the forecast service for `forecast_days`.
pub const MAX_FORECAST_DAYS: u8 = 16;
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

#[derive(Debug, Deserialize)]
struct FcResponse {
    #[serde(default)]
    current_weather: Option<FcCurrent>,
    #[serde(default)]
    daily: Option<FcDaily>,
}

#[derive(Debug, Deserialize)]
struct FcCurrent {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    weathercode: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct FcDaily {
    #[serde(default)]
    time: Option<Vec<Option<String>>>,
    #[serde(default)]
    temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    weathercode: Option<Vec<Option<i64>>>,
}

impl From<FcDaily> for DailySeries {
    fn from(d: FcDaily) -> Self {
        Self {
            time: d.time.unwrap_or_default(),
            temperature_min: d.temperature_2m_min.unwrap_or_default(),
            temperature_max: d.temperature_2m_max.unwrap_or_default(),
            weather_code: d.weathercode.unwrap_or_default(),
        }
    }
}

pub fn forecast_url(base: &str, latitude: f64, longitude: f64, days: u8) -> String {
    format!(
        "{base}?latitude={latitude}&longitude={longitude}&current_weather=true\
         &daily={DAILY_FIELDS}&forecast_days={days}&timezone=auto"
    )
}

/// Fetch current conditions and the daily series for a coordinate pair.
///
/// A missing daily section is not an error; the returned [`DailySeries`] is simply empty.
pub async fn fetch_forecast(
    http: &dyn HttpClient,
    base: &str,
    latitude: f64,
    longitude: f64,
    days: u8,
) -> Result<ForecastData, WeatherError> {
    let url = forecast_url(base, latitude, longitude, days);
    debug!(%url, "requesting forecast");

    let res = http.get(&url).await.inspect_err(|e| {
        error!(latitude, longitude, error = %e, "forecast request failed");
    })?;

    if !res.is_success() {
        let status = res.status;
        error!(latitude, longitude, status, "forecast service returned an error status");
        return Err(WeatherError::ForecastService);
    }

    let parsed: FcResponse = serde_json::from_str(&res.body).map_err(|e| {
        error!(latitude, longitude, error = %e, "failed to parse forecast JSON");
        WeatherError::InvalidResponse(e.to_string())
    })?;

    let current = match parsed.current_weather {
        Some(FcCurrent {
            temperature: Some(temperature),
            weathercode: Some(weather_code),
        }) => CurrentConditions {
            temperature,
            weather_code,
        },
        _ => {
            warn!(latitude, longitude, "forecast response has no current conditions");
            return Err(WeatherError::DataUnavailable);
        }
    };

    let daily: DailySeries = parsed.daily.unwrap_or_default().into();
    if daily.time.is_empty() {
        debug!(latitude, longitude, "forecast response has no daily series");
    }

    Ok(ForecastData { current, daily })
}
