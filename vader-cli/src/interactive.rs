//! Menu-driven flow used when no subcommand is given.

use anyhow::Result;
use chrono::NaiveDate;
use inquire::{
    Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Select, Text,
    validator::Validation,
};
use std::fmt;
use vader_core::{Config, Location, ProviderId, Units, provider::geoip};

use crate::report;

const FALLBACK_COUNTRY: &str = "SE";
const GOODBYE: &str = "Tack för att du använder vår väderapp. Hejdå!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Current,
    Forecast,
    Historical,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportKind::Current => "Nuvarande väder",
            ReportKind::Forecast => "5 dagars prognos",
            ReportKind::Historical => "Historisk väderinformation",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    City,
    Zip,
    Here,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchKind::City => "Stad",
            SearchKind::Zip => "Postnummer",
            SearchKind::Here => "Nuvarande plats",
        })
    }
}

struct UnitChoice(Units);

impl fmt::Display for UnitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            Units::Metric => "Metriskt (Celsius)",
            Units::Imperial => "Imperial (Fahrenheit)",
        })
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let units = choose_units(config.units)?;
    let kind = Select::new(
        "Ange typ av väderprognos:",
        vec![ReportKind::Current, ReportKind::Forecast, ReportKind::Historical],
    )
    .prompt()?;

    loop {
        let attempt = match kind {
            ReportKind::Current => match choose_location().await {
                Ok(location) => report::show_current(config, units, &location).await,
                Err(e) => Err(e),
            },
            ReportKind::Forecast => match choose_location().await {
                Ok(location) => report::show_forecast(config, units, &location).await,
                Err(e) => Err(e),
            },
            ReportKind::Historical => match ask_history() {
                Ok((city, date)) => report::show_history(config, &city, date).await,
                Err(e) => Err(e),
            },
        };

        match attempt {
            Ok(()) => return Ok(()),
            Err(err) if is_cancelled(&err) => {
                log::debug!("prompt cancelled, leaving");
                println!("{GOODBYE}");
                return Ok(());
            }
            Err(err) => {
                log::warn!("report failed: {err:#}");
                eprintln!(
                    "\nNågot gick fel med sökningen. Kontrollera stavningen och internetanslutningen!\n\
                     Felmeddelande: {err:#}\n"
                );
                let again = Confirm::new("Vill du försöka igen?").with_default(true);
                let retry = match again.prompt() {
                    Ok(retry) => retry,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => false,
                    Err(e) => return Err(e.into()),
                };
                if !retry {
                    println!("{GOODBYE}");
                    return Ok(());
                }
            }
        }
    }
}

/// Esc or Ctrl-C at any prompt ends the session instead of offering a retry.
fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

fn choose_units(default: Units) -> Result<Units> {
    let choices = vec![UnitChoice(Units::Metric), UnitChoice(Units::Imperial)];
    let start = choices.iter().position(|c| c.0 == default).unwrap_or(0);

    let choice = Select::new("Välj enhetssystem:", choices).with_starting_cursor(start).prompt()?;
    Ok(choice.0)
}

/// Asks how to search and builds the matching location.
pub async fn choose_location() -> Result<Location> {
    let kind = Select::new(
        "Ange typ av sökning:",
        vec![SearchKind::City, SearchKind::Zip, SearchKind::Here],
    )
    .prompt()?;

    match kind {
        SearchKind::City => {
            let city = Text::new("Ange stad:").with_validator(non_empty).prompt()?;
            Ok(Location::City(city.trim().to_string()))
        }
        SearchKind::Zip => {
            let country = country_or_default().await;
            let zip = Text::new("Ange postnummer:").with_validator(five_digits).prompt()?;
            Location::zip(&zip, &country)
        }
        SearchKind::Here => Ok(geoip::locate_by_ip().await?.coordinates()),
    }
}

/// Country of the caller's IP, or Sweden when the lookup fails.
pub async fn country_or_default() -> String {
    match geoip::locate_by_ip().await {
        Ok(location) => location.country,
        Err(err) => {
            log::warn!("could not locate caller, assuming {FALLBACK_COUNTRY}: {err:#}");
            FALLBACK_COUNTRY.to_string()
        }
    }
}

fn ask_history() -> Result<(String, NaiveDate)> {
    let city = Text::new("Ange stad:").with_validator(non_empty).prompt()?;
    let date = CustomType::<NaiveDate>::new("Ange datum (YYYY-MM-DD), tidigast 2008-07-01:")
        .with_error_message("Formatet måste vara YYYY-MM-DD")
        .prompt()?;
    Ok((city.trim().to_string(), date))
}

pub fn ask_api_key(id: ProviderId) -> Result<String> {
    let key = Password::new(&format!("API-nyckel för {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(non_empty)
        .prompt()?;
    Ok(key.trim().to_string())
}

fn non_empty(input: &str) -> Result<Validation, inquire::CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Får inte vara tomt".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn five_digits(input: &str) -> Result<Validation, inquire::CustomUserError> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 5 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Postnumret måste vara fem siffror".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(res: Result<Validation, inquire::CustomUserError>) -> bool {
        matches!(res, Ok(Validation::Valid))
    }

    #[test]
    fn five_digit_validator() {
        assert!(is_valid(five_digits("41104")));
        assert!(is_valid(five_digits("411 04")));
        assert!(!is_valid(five_digits("4110")));
        assert!(!is_valid(five_digits("4110x")));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(!is_valid(non_empty("   ")));
        assert!(is_valid(non_empty("Lund")));
    }

    #[test]
    fn cancelled_prompts_end_the_session() {
        assert!(is_cancelled(&anyhow::Error::from(InquireError::OperationCanceled)));
        assert!(is_cancelled(&anyhow::Error::from(InquireError::OperationInterrupted)));
        assert!(is_cancelled(
            &anyhow::Error::from(InquireError::OperationCanceled).context("Ange stad:")
        ));
    }

    #[test]
    fn failed_lookups_offer_a_retry() {
        assert!(!is_cancelled(&anyhow::anyhow!("city not found")));
        assert!(!is_cancelled(&anyhow::Error::from(InquireError::NotTTY)));
    }

    #[test]
    fn menu_labels() {
        assert_eq!(ReportKind::Forecast.to_string(), "5 dagars prognos");
        assert_eq!(SearchKind::Here.to_string(), "Nuvarande plats");
        assert_eq!(UnitChoice(Units::Imperial).to_string(), "Imperial (Fahrenheit)");
    }
}
