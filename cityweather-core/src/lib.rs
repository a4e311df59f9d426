//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - City query validation
//! - Geocoding and forecast lookups against the Open-Meteo services
//! - Weather code translation and result assembly
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod assemble;
pub mod codes;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod http;
pub mod model;
pub mod query;
pub mod service;

pub use config::{Config, Endpoints};
pub use error::{ErrorKind, WeatherError};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use model::{DailyForecastEntry, GeoResult, WeatherResult};
pub use query::CityQuery;
pub use service::{SearchSequencer, SearchTicket, WeatherService, resolve_weather};
