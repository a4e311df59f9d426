use chrono::NaiveDate;
use cityweather_core::{DailyForecastEntry, WeatherError, WeatherResult};

pub fn weather(result: &WeatherResult) -> String {
    let mut lines = vec![
        format!("Weather in {}", result.city),
        format!("Temperature: {}°C", result.temperature),
        format!("Description: {}", result.description),
    ];

    if !result.forecast.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}-Day Forecast", result.forecast.len()));
        for day in &result.forecast {
            lines.push(format!("  {}", forecast_day(day)));
        }
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn forecast_day(day: &DailyForecastEntry) -> String {
    format!(
        "{}: {}, {}°C - {}°C",
        label_date(&day.date),
        day.description,
        day.min_temp,
        day.max_temp
    )
}

/// `2024-01-01` becomes `Mon 2024-01-01`; anything unparsable is shown as-is.
fn label_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{} {date}", d.format("%a")),
        Err(_) => date.to_string(),
    }
}

/// `{"kind": ..., "message": ...}` for `--json` output.
pub fn error_json(err: &WeatherError) -> serde_json::Result<String> {
    let body = serde_json::json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    serde_json::to_string_pretty(&body)
}

pub fn codes<'a>(codes: impl Iterator<Item = (i64, &'a str)>) -> String {
    codes
        .map(|(code, text)| format!("{code:>3}  {text}\n"))
        .collect()
}
