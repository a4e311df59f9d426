use anyhow::Context;
use cityweather_core::{
    Config, HttpClient, ReqwestHttpClient, WeatherService, codes, forecast::MAX_FORECAST_DAYS,
};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use std::{
    io::{self, Write},
    process::ExitCode,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Current weather and forecast for a city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the result (or the error) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities repeatedly until cancelled (Esc or Ctrl-C).
    Search,

    /// Change endpoints or forecast length and save the config file.
    Configure {
        #[arg(long)]
        geocoding_url: Option<String>,

        #[arg(long)]
        forecast_url: Option<String>,

        /// Number of forecast days (1-16).
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(1..=MAX_FORECAST_DAYS as i64)
        )]
        forecast_days: Option<u8>,

        /// Start from the default configuration.
        #[arg(long)]
        reset: bool,
    },

    /// List known weather codes.
    Codes,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show { city, json } => {
                let service = load_service()?;
                let city = city.join(" ");
                let (mut out, mut err) = (io::stdout(), io::stderr());

                if !show(&service, &city, json, &mut out, &mut err).await? {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Search => {
                let service = load_service()?;
                search(&service).await?;
            }
            Command::Configure {
                geocoding_url,
                forecast_url,
                forecast_days,
                reset,
            } => {
                let mut cfg = if reset {
                    Config::default()
                } else {
                    Config::load()?
                };

                if let Some(url) = geocoding_url {
                    cfg.endpoints.geocoding = url;
                }
                if let Some(url) = forecast_url {
                    cfg.endpoints.forecast = url;
                }
                if let Some(days) = forecast_days {
                    cfg.forecast_days = days;
                }

                let path = cfg.save()?;
                println!("Saved configuration to {}", path.display());
                println!("  geocoding:     {}", cfg.endpoints.geocoding);
                println!("  forecast:      {}", cfg.endpoints.forecast);
                println!("  forecast days: {}", cfg.forecast_days);
            }
            Command::Codes => {
                print!("{}", render::codes(codes::known_codes()));
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn load_service() -> anyhow::Result<WeatherService<ReqwestHttpClient>> {
    let cfg = Config::load()?.with_env_overrides();
    cfg.validate().context("Invalid configuration")?;
    Ok(WeatherService::from_config(&cfg))
}

/// Look up `city` and write the result, or the lookup error verbatim.
///
/// Returns `false` when the lookup failed. With `json`, errors go to `out` as
/// `{"kind", "message"}` so the output stays machine-readable.
async fn show<C: HttpClient>(
    service: &WeatherService<C>,
    city: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    match service.resolve_weather(city).await {
        Ok(result) if json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        Ok(result) => {
            write!(out, "{}", render::weather(&result))?;
        }
        Err(e) if json => {
            writeln!(out, "{}", render::error_json(&e)?)?;
            return Ok(false);
        }
        Err(e) => {
            writeln!(err, "{e}")?;
            return Ok(false);
        }
    }

    Ok(true)
}

async fn search<C: HttpClient>(service: &WeatherService<C>) -> anyhow::Result<()> {
    loop {
        let input = match Text::new("Enter city name").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        let city = input.trim();
        if city.is_empty() {
            continue;
        }

        println!("Searching...");
        match service.resolve_weather(city).await {
            Ok(result) => println!("\n{}", render::weather(&result)),
            Err(e) => eprintln!("{e}\n"),
        }
    }

    Ok(())
}
