//! WMO weather interpretation codes as reported by the forecast service.

use std::borrow::Cow;

const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Description for `code`, or `"Weather code: <code>"` when the table has no entry.
pub fn describe(code: i64) -> Cow<'static, str> {
    match lookup(code) {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(format!("Weather code: {code}")),
    }
}

pub fn lookup(code: i64) -> Option<&'static str> {
    WEATHER_CODES
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|idx| WEATHER_CODES[idx].1)
}

/// All known codes in ascending order.
pub fn known_codes() -> impl Iterator<Item = (i64, &'static str)> {
    WEATHER_CODES.iter().copied()
}
