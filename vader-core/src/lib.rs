//! Core library for the `vader` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Typed parsing of provider payloads
//! - Grouping of the 3-hour forecast into days
//! - Box-drawn text rendering of current, forecast and historical reports
//! - Provider clients (OpenWeatherMap, WorldWeatherOnline, ipinfo.io)
//!
//! It is used by `vader-cli`, but can also be reused by other binaries.

pub mod boxes;
pub mod config;
pub mod error;
pub mod grouping;
pub mod icon;
pub mod model;
pub mod payload;
pub mod present;
pub mod provider;

pub use config::{Config, ProviderConfig, Widths};
pub use error::PayloadError;
pub use grouping::{DayGroup, DayGrouper};
pub use model::{Forecast, ForecastSample, HistoricalReport, Units, WeatherReport};
pub use present::{CurrentWeatherPresenter, ForecastPresenter, HistoricalPresenter};
pub use provider::{HistoricalProvider, Location, ProviderId, WeatherProvider};
