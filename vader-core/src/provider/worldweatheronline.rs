use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;

use crate::{model::HistoricalReport, payload, provider::status_error};

use super::HistoricalProvider;

const URL: &str = "https://api.worldweatheronline.com/premium/v1/past-weather.ashx";

/// First day with archived data.
pub fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2008, 7, 1).unwrap_or_default()
}

/// Accepts dates from [`earliest_date`] up to and including `today`.
pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date < earliest_date() {
        bail!("Historical data is only available from {} onwards, got {date}", earliest_date());
    }
    if date > today {
        bail!("Historical date {date} is in the future");
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct WorldWeatherOnlineProvider {
    api_key: String,
    http: Client,
}

impl WorldWeatherOnlineProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl HistoricalProvider for WorldWeatherOnlineProvider {
    async fn history(&self, city: &str, date: NaiveDate) -> Result<HistoricalReport> {
        validate_date(date, Local::now().date_naive())?;
        log::info!("requesting WorldWeatherOnline history for {city} on {date}");
        let date_param = date.format("%Y-%m-%d").to_string();

        let res = self
            .http
            .get(URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("format", "json"),
                ("q", city),
                ("date", date_param.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to WorldWeatherOnline (history)")?;

        let status = res.status();
        let body =
            res.text().await.context("Failed to read WorldWeatherOnline history response body")?;

        if !status.is_success() {
            return Err(status_error("WorldWeatherOnline history", status, &body));
        }

        payload::parse_historical(&body).context("Failed to parse WorldWeatherOnline history JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_range_bounds() {
        let today = day(2024, 10, 1);

        assert!(validate_date(day(2008, 7, 1), today).is_ok());
        assert!(validate_date(today, today).is_ok());
    }

    #[test]
    fn rejects_before_archive_start() {
        let err = validate_date(day(2008, 6, 30), day(2024, 10, 1)).unwrap_err();
        assert!(err.to_string().contains("2008-07-01"));
    }

    #[test]
    fn rejects_future() {
        let err = validate_date(day(2024, 10, 2), day(2024, 10, 1)).unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }
}
