use anyhow::anyhow;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Unit system requested from the provider. Values are never converted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Suffix printed after the degree sign.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    /// Value of the `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            _ => Err(anyhow!("Unknown unit system '{value}'. Supported: metric, imperial.")),
        }
    }
}

/// One 3-hour step of the 5-day forecast, in the location's local time.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub code: u16,
    pub description: String,
}

impl ForecastSample {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Parsed 5-day forecast payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub city: String,
    pub samples: Vec<ForecastSample>,
}

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub code: u16,
}

/// Single day of historical observations. Temperatures are always Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalReport {
    pub query: String,
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub sun_hours: f64,
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
