//! Fetch one report and print it to stdout.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{self, Write};
use vader_core::{
    Config, CurrentWeatherPresenter, HistoricalPresenter, Location, Units, present,
    provider::{historical_provider_from_config, weather_provider_from_config},
};

pub async fn show_current(config: &Config, units: Units, location: &Location) -> Result<()> {
    let provider = weather_provider_from_config(config, units)?;
    let report = provider.current(location).await?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    CurrentWeatherPresenter::new(config.widths.current)
        .render(&report, units, &mut out)
        .context("Failed to write current weather")
}

pub async fn show_forecast(config: &Config, units: Units, location: &Location) -> Result<()> {
    let provider = weather_provider_from_config(config, units)?;
    let forecast = provider.forecast(location).await?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    present::write_forecast(&forecast, units, config, &mut out)
        .context("Failed to write forecast")
}

pub async fn show_history(config: &Config, city: &str, date: NaiveDate) -> Result<()> {
    let provider = historical_provider_from_config(config)?;
    let report = provider.history(city, date).await?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    HistoricalPresenter::new(config.widths.historical)
        .render(&report, &mut out)
        .context("Failed to write historical weather")
}
