//! Approximate location of the caller from their public IP address.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::provider::{Location, status_error};

const URL: &str = "https://ipinfo.io/json";

#[derive(Debug, Clone, PartialEq)]
pub struct IpLocation {
    pub lat: f64,
    pub lon: f64,
    /// ISO 3166 country code, e.g. `"SE"`.
    pub country: String,
}

impl IpLocation {
    pub fn coordinates(&self) -> Location {
        Location::Coordinates { lat: self.lat, lon: self.lon }
    }
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    /// `"lat,lon"`
    loc: String,
    country: String,
}

fn parse_ipinfo(body: &str) -> Result<IpLocation> {
    let info: IpInfo = serde_json::from_str(body).context("Failed to parse ipinfo JSON")?;

    let (lat, lon) = info
        .loc
        .split_once(',')
        .ok_or_else(|| anyhow!("Unexpected `loc` value '{}'", info.loc))?;

    Ok(IpLocation {
        lat: lat.trim().parse().with_context(|| format!("Invalid latitude '{lat}'"))?,
        lon: lon.trim().parse().with_context(|| format!("Invalid longitude '{lon}'"))?,
        country: info.country,
    })
}

pub async fn locate_by_ip() -> Result<IpLocation> {
    let res = Client::new()
        .get(URL)
        .send()
        .await
        .context("Failed to send request to ipinfo.io")?;

    let status = res.status();
    let body = res.text().await.context("Failed to read ipinfo.io response body")?;

    if !status.is_success() {
        return Err(status_error("ipinfo.io", status, &body));
    }

    let location = parse_ipinfo(&body)?;
    log::debug!("located caller at {}, {} ({})", location.lat, location.lon, location.country);
    Ok(location)
}
