use crate::{
    Config,
    model::{Forecast, HistoricalReport, Units, WeatherReport},
    provider::{openweather::OpenWeatherProvider, worldweatheronline::WorldWeatherOnlineProvider},
};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{convert::TryFrom, fmt::Debug};

pub mod geoip;
pub mod openweather;
pub mod worldweatheronline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WorldWeatherOnline,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WorldWeatherOnline => "worldweatheronline",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WorldWeatherOnline]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "worldweatheronline" => Ok(ProviderId::WorldWeatherOnline),
            _ => Err(anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, worldweatheronline."
            )),
        }
    }
}

/// Where to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    /// Postcode within a country, e.g. `"411 04"` in `"SE"`.
    Zip { code: String, country: String },
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Builds a postcode location. Five-digit codes are normalised to the
    /// Swedish `"xxx xx"` form.
    pub fn zip(code: &str, country: &str) -> anyhow::Result<Self> {
        let digits: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 5 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow!("Postcode '{code}' must be exactly five digits"));
        }

        Ok(Location::Zip {
            code: format!("{} {}", &digits[..3], &digits[3..]),
            country: country.trim().to_uppercase(),
        })
    }

    /// Query parameters selecting this location.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(name) => vec![("q", name.clone())],
            Location::Zip { code, country } => vec![("zip", format!("{code},{country}"))],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Zip { code, country } => write!(f, "{code}, {country}"),
            Location::Coordinates { lat, lon } => write!(f, "{lat:.4}, {lon:.4}"),
        }
    }
}

/// Source of current conditions and the 5-day forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> anyhow::Result<WeatherReport>;

    async fn forecast(&self, location: &Location) -> anyhow::Result<Forecast>;
}

/// Source of past daily observations.
#[async_trait]
pub trait HistoricalProvider: Send + Sync + Debug {
    async fn history(&self, city: &str, date: NaiveDate) -> anyhow::Result<HistoricalReport>;
}

/// Construct the current/forecast provider from config.
pub fn weather_provider_from_config(
    config: &Config,
    units: Units,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key(ProviderId::OpenWeather)?;
    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned(), units, config.lang.clone())))
}

/// Construct the historical provider from config.
pub fn historical_provider_from_config(
    config: &Config,
) -> anyhow::Result<Box<dyn HistoricalProvider>> {
    let api_key = config.require_api_key(ProviderId::WorldWeatherOnline)?;
    Ok(Box::new(WorldWeatherOnlineProvider::new(api_key.to_owned())))
}

/// Error for a non-success response, carrying a body excerpt.
pub(crate) fn status_error(what: &str, status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    anyhow!("{what} request failed with status {status}: {}", truncate_body(body))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
