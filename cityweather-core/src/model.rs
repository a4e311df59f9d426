use serde::{Deserialize, Serialize};

/// First geocoding match for a city query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    /// `None` when the service returned no usable name.
    pub resolved_name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_code: i64,
}

/// Parallel per-day arrays as delivered by the forecast service.
///
/// Arrays are empty when the service omitted the daily section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub time: Vec<Option<String>>,
    pub temperature_min: Vec<Option<f64>>,
    pub temperature_max: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastData {
    pub current: CurrentConditions,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastEntry {
    /// ISO calendar date, e.g. `2024-01-01`.
    pub date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub description: String,
}

/// Normalized outcome of a successful lookup. Temperatures are in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub forecast: Vec<DailyForecastEntry>,
}
