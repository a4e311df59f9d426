use crate::{
    codes,
    model::{DailyForecastEntry, DailySeries, ForecastData, GeoResult, WeatherResult},
    query::CityQuery,
};

/// Build the final result from the two service responses.
pub fn assemble(query: &CityQuery, geo: GeoResult, forecast: ForecastData) -> WeatherResult {
    WeatherResult {
        city: display_city(query, &geo),
        temperature: forecast.current.temperature,
        description: codes::describe(forecast.current.weather_code).into_owned(),
        forecast: daily_entries(forecast.daily),
    }
}

/// `"<name>, <country>"`, `"<name>"`, or the query itself when geocoding gave no name.
fn display_city(query: &CityQuery, geo: &GeoResult) -> String {
    match (&geo.resolved_name, &geo.country) {
        (Some(name), Some(country)) => format!("{name}, {country}"),
        (Some(name), None) => name.clone(),
        (None, _) => query.as_str().to_owned(),
    }
}

/// Zip the parallel arrays up to the shortest one; days with any missing value are skipped.
fn daily_entries(daily: DailySeries) -> Vec<DailyForecastEntry> {
    daily
        .time
        .into_iter()
        .zip(daily.temperature_min)
        .zip(daily.temperature_max)
        .zip(daily.weather_code)
        .filter_map(|(((date, min), max), code)| {
            Some(DailyForecastEntry {
                date: date?,
                min_temp: min?,
                max_temp: max?,
                description: codes::describe(code?).into_owned(),
            })
        })
        .collect()
}
