use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::{
    assemble::assemble,
    config::{Config, Endpoints},
    error::WeatherError,
    forecast::{DEFAULT_FORECAST_DAYS, fetch_forecast},
    geocoding::resolve_city,
    http::{HttpClient, ReqwestHttpClient},
    model::WeatherResult,
    query::CityQuery,
};

/// The city → weather pipeline.
///
/// Holds no mutable state, so one service can serve any number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct WeatherService<C> {
    http: C,
    endpoints: Endpoints,
    forecast_days: u8,
}

impl WeatherService<ReqwestHttpClient> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_client(ReqwestHttpClient::new(), config)
    }
}

impl<C: HttpClient> WeatherService<C> {
    /// Service against the default endpoints using the given client.
    pub fn new(http: C) -> Self {
        Self {
            http,
            endpoints: Endpoints::default(),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    pub fn with_client(http: C, config: &Config) -> Self {
        Self {
            http,
            endpoints: config.endpoints.clone(),
            forecast_days: config.forecast_days,
        }
    }

    /// Validate `raw`, geocode it, fetch its forecast and assemble the result.
    ///
    /// The first failing stage ends the lookup; its error is returned unchanged.
    pub async fn resolve_weather(&self, raw: &str) -> Result<WeatherResult, WeatherError> {
        let query = CityQuery::parse(raw).inspect_err(|_| {
            warn!(raw, "rejected city query");
        })?;

        info!(city = %query, "resolving weather");

        let geo = resolve_city(&self.http, &self.endpoints.geocoding, &query).await?;

        let forecast = fetch_forecast(
            &self.http,
            &self.endpoints.forecast,
            geo.latitude,
            geo.longitude,
            self.forecast_days,
        )
        .await?;

        let result = assemble(&query, geo, forecast);
        debug!(city = %result.city, days = result.forecast.len(), "weather resolved");

        Ok(result)
    }
}

/// Resolve `city` against the default endpoints with a fresh HTTP client.
pub async fn resolve_weather(city: &str) -> Result<WeatherResult, WeatherError> {
    WeatherService::new(ReqwestHttpClient::new())
        .resolve_weather(city)
        .await
}

/// Identifies one search issued through a [`SearchSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Orders overlapping searches so a caller can drop results that were superseded
/// by a newer search before they settled.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search; every earlier ticket becomes stale.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `outcome` through only if `ticket` is still the latest search.
    pub fn accept<T>(&self, ticket: SearchTicket, outcome: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(outcome)
        } else {
            debug!(ticket = ticket.0, "discarding superseded search result");
            None
        }
    }
}
