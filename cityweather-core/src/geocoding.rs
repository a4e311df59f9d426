use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::{error::WeatherError, http::HttpClient, model::GeoResult, query::CityQuery};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Characters left unescaped in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoEntry>>,
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

pub fn geocoding_url(base: &str, city: &CityQuery) -> String {
    let name = utf8_percent_encode(city.as_str(), URI_COMPONENT);
    format!("{base}?name={name}&count=1")
}

/// Look up `city` and return the first match. Only one match is ever requested.
pub async fn resolve_city(
    http: &dyn HttpClient,
    base: &str,
    city: &CityQuery,
) -> Result<GeoResult, WeatherError> {
    let url = geocoding_url(base, city);
    debug!(%url, "requesting geocoding");

    let res = http.get(&url).await.inspect_err(|e| {
        error!(city = %city, error = %e, "geocoding request failed");
    })?;

    if !res.is_success() {
        error!(city = %city, status = res.status, "geocoding service returned an error status");
        return Err(WeatherError::GeoService);
    }

    let parsed: GeoResponse = serde_json::from_str(&res.body).map_err(|e| {
        error!(city = %city, error = %e, "failed to parse geocoding JSON");
        WeatherError::InvalidResponse(e.to_string())
    })?;

    let Some(first) = parsed.results.unwrap_or_default().into_iter().next() else {
        warn!(city = %city, "no geocoding match");
        return Err(WeatherError::CityNotFound);
    };

    let result = GeoResult {
        latitude: first.latitude,
        longitude: first.longitude,
        resolved_name: first.name.filter(|n| !n.is_empty()),
        country: first.country.filter(|c| !c.is_empty()),
    };

    debug!(
        "resolved {city} to {:?} at ({}, {})",
        result.resolved_name, result.latitude, result.longitude
    );

    Ok(result)
}
