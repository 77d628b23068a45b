use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use vader_core::{Config, Location, ProviderId, Units, provider::geoip};

use crate::{interactive, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "vader", version, about = "Weather reports drawn as boxes in the terminal")]
pub struct Cli {
    /// Without a subcommand the interactive menus are shown.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key of a provider.
    Configure {
        /// Provider short name: "openweather" or "worldweatheronline".
        provider: String,
    },

    /// Show current conditions.
    Current {
        #[command(flatten)]
        location: LocationArgs,

        /// "metric" or "imperial"; defaults to the configured unit system.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },

    /// Show the 5-day forecast.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// "metric" or "imperial"; defaults to the configured unit system.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },

    /// Show observations for a past day.
    History {
        #[arg(long)]
        city: String,

        /// Date as YYYY-MM-DD, no earlier than 2008-07-01.
        #[arg(long)]
        date: NaiveDate,
    },
}

/// Location selection; at most one may be given.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct LocationArgs {
    /// City name, e.g. "Göteborg".
    #[arg(long)]
    pub city: Option<String>,

    /// Five-digit postcode in the caller's country.
    #[arg(long)]
    pub zip: Option<String>,

    /// Use the approximate location of this machine's public IP.
    #[arg(long)]
    pub here: bool,
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

impl LocationArgs {
    /// Resolves the flags, or asks interactively when none were given.
    async fn resolve(self) -> Result<Location> {
        if let Some(city) = self.city {
            return Ok(Location::City(city));
        }
        if let Some(zip) = self.zip {
            let country = interactive::country_or_default().await;
            return Location::zip(&zip, &country);
        }
        if self.here {
            return Ok(geoip::locate_by_ip().await?.coordinates());
        }
        interactive::choose_location().await
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Some(Command::Configure { provider }) => {
                let id = ProviderId::try_from(provider.as_str())?;
                let api_key = interactive::ask_api_key(id)?;
                config.upsert_provider_api_key(id, api_key);
                config.save()?;
                println!("Saved API key for {id}.");
            }
            Some(Command::Current { location, units }) => {
                let units = units.unwrap_or(config.units);
                let location = location.resolve().await?;
                report::show_current(&config, units, &location).await?;
            }
            Some(Command::Forecast { location, units }) => {
                let units = units.unwrap_or(config.units);
                let location = location.resolve().await?;
                report::show_forecast(&config, units, &location).await?;
            }
            Some(Command::History { city, date }) => {
                report::show_history(&config, &city, date).await?;
            }
            None => interactive::run(&config).await?,
        }

        Ok(())
    }
}
