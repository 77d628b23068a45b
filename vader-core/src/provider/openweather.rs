use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::{
    model::{Forecast, Units, WeatherReport},
    payload,
    provider::{Location, status_error},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units, lang: String) -> Self {
        Self { api_key, units, lang, http: Client::new() }
    }

    fn query(&self, location: &Location) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("appid", self.api_key.clone()),
            ("units", self.units.as_query().to_string()),
            ("lang", self.lang.clone()),
        ];
        params.extend(location.query_params());
        params
    }

    async fn fetch(&self, endpoint: &str, what: &str, location: &Location) -> Result<String> {
        let url = format!("{BASE_URL}/{endpoint}");
        log::info!("requesting OpenWeather {what} for {location}");

        let res = self
            .http
            .get(&url)
            .query(&self.query(location))
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(status_error(&format!("OpenWeather {what}"), status, &body));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &Location) -> Result<WeatherReport> {
        let body = self.fetch("weather", "current weather", location).await?;
        payload::parse_current(&body).context("Failed to parse OpenWeather current JSON")
    }

    async fn forecast(&self, location: &Location) -> Result<Forecast> {
        let body = self.fetch("forecast", "5-day forecast", location).await?;
        payload::parse_forecast(&body).context("Failed to parse OpenWeather forecast JSON")
    }
}
