//! Boundary between raw provider JSON and the typed domain model.
//!
//! Every body is decoded exactly once here. Missing fields and empty arrays
//! fail with [`PayloadError::Malformed`] so rendering never sees partial data.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::PayloadError,
    model::{Forecast, ForecastSample, HistoricalReport, WeatherReport},
};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    /// Shift from UTC in seconds.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: Option<i64>,
    dt_txt: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct WwoRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WwoDay {
    date: String,
    #[serde(rename = "maxtempC")]
    max_temp_c: String,
    #[serde(rename = "mintempC")]
    min_temp_c: String,
    sun_hour: String,
}

#[derive(Debug, Deserialize)]
struct WwoData {
    request: Vec<WwoRequest>,
    weather: Vec<WwoDay>,
}

#[derive(Debug, Deserialize)]
struct WwoResponse {
    data: WwoData,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, PayloadError> {
    serde_json::from_str(body).map_err(|e| {
        if e.is_data() { PayloadError::malformed(e.to_string()) } else { PayloadError::Json(e) }
    })
}

fn primary_weather(weather: &[OwWeather], context: &str) -> Result<(u16, String), PayloadError> {
    weather
        .first()
        .map(|w| (w.id, w.description.clone()))
        .ok_or_else(|| PayloadError::malformed(format!("{context}: empty `weather` array")))
}

/// Parses an OpenWeatherMap `/weather` response.
pub fn parse_current(body: &str) -> Result<WeatherReport, PayloadError> {
    let parsed: OwCurrentResponse = decode(body)?;
    let (code, description) = primary_weather(&parsed.weather, "current weather")?;

    Ok(WeatherReport {
        city: parsed.name,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        description,
        code,
    })
}

/// Parses an OpenWeatherMap `/forecast` response into local-time samples.
pub fn parse_forecast(body: &str) -> Result<Forecast, PayloadError> {
    let parsed: OwForecastResponse = decode(body)?;

    let offset = FixedOffset::east_opt(parsed.city.timezone).ok_or_else(|| {
        PayloadError::malformed(format!("city.timezone {} is out of range", parsed.city.timezone))
    })?;

    let samples = parsed
        .list
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<ForecastSample, PayloadError> {
            let context = format!("list[{index}]");
            let timestamp = sample_timestamp(entry, offset, &context)?;
            let (code, description) = primary_weather(&entry.weather, &context)?;
            let temp_min = entry
                .main
                .temp_min
                .ok_or_else(|| PayloadError::malformed(format!("{context}: missing `main.temp_min`")))?;
            let temp_max = entry
                .main
                .temp_max
                .ok_or_else(|| PayloadError::malformed(format!("{context}: missing `main.temp_max`")))?;

            Ok(ForecastSample {
                timestamp,
                temperature: entry.main.temp,
                feels_like: entry.main.feels_like,
                temp_min,
                temp_max,
                code,
                description,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} forecast samples for {}", samples.len(), parsed.city.name);

    Ok(Forecast { city: parsed.city.name, samples })
}

fn sample_timestamp(
    entry: &OwForecastEntry,
    offset: FixedOffset,
    context: &str,
) -> Result<DateTime<FixedOffset>, PayloadError> {
    if let Some(dt) = entry.dt {
        return DateTime::from_timestamp(dt, 0)
            .map(|utc| utc.with_timezone(&offset))
            .ok_or_else(|| PayloadError::malformed(format!("{context}: `dt` {dt} is out of range")));
    }

    let text = entry
        .dt_txt
        .as_deref()
        .ok_or_else(|| PayloadError::malformed(format!("{context}: neither `dt` nor `dt_txt` present")))?;

    // `dt_txt` is already wall-clock time.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .ok_or_else(|| PayloadError::malformed(format!("{context}: unparsable `dt_txt` '{text}'")))
}

/// Parses a WorldWeatherOnline `past-weather.ashx` response.
pub fn parse_historical(body: &str) -> Result<HistoricalReport, PayloadError> {
    let parsed: WwoResponse = decode(body)?;

    let query = parsed
        .data
        .request
        .into_iter()
        .next()
        .map(|r| r.query)
        .ok_or_else(|| PayloadError::malformed("data.request is empty"))?;

    let day = parsed
        .data
        .weather
        .first()
        .ok_or_else(|| PayloadError::malformed("data.weather is empty"))?;

    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map_err(|_| PayloadError::malformed(format!("unparsable date '{}'", day.date)))?;

    Ok(HistoricalReport {
        query,
        date,
        max_temp: number_field(&day.max_temp_c, "maxtempC")?,
        min_temp: number_field(&day.min_temp_c, "mintempC")?,
        sun_hours: number_field(&day.sun_hour, "sunHour")?,
    })
}

fn number_field(value: &str, name: &str) -> Result<f64, PayloadError> {
    value
        .trim()
        .parse()
        .map_err(|_| PayloadError::malformed(format!("`{name}` is not a number: '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const CURRENT: &str = r#"{
        "name": "Göteborg",
        "dt": 1727784000,
        "main": { "temp": 11.5, "feels_like": 10.2, "temp_min": 10.0, "temp_max": 12.0 },
        "weather": [{ "id": 500, "main": "Rain", "description": "lätt regn" }]
    }"#;

    #[test]
    fn current_payload_is_parsed() {
        let report = parse_current(CURRENT).expect("valid payload");

        assert_eq!(report.city, "Göteborg");
        assert_eq!(report.temperature, 11.5);
        assert_eq!(report.feels_like, 10.2);
        assert_eq!(report.code, 500);
        assert_eq!(report.description, "lätt regn");
    }

    #[test]
    fn current_payload_without_weather_is_malformed() {
        let body = r#"{ "name": "X", "main": { "temp": 1.0, "feels_like": 1.0 }, "weather": [] }"#;
        let err = parse_current(body).unwrap_err();

        assert!(matches!(err, PayloadError::Malformed(_)));
        assert!(err.to_string().contains("empty `weather` array"));
    }

    #[test]
    fn missing_field_is_malformed_not_json() {
        let body = r#"{ "name": "X", "main": { "feels_like": 1.0 }, "weather": [] }"#;
        let err = parse_current(body).unwrap_err();

        assert!(matches!(err, PayloadError::Malformed(_)));
        assert!(err.to_string().contains("temp"));
    }

    #[test]
    fn syntax_error_is_json() {
        let err = parse_current("{ not json").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn forecast_uses_city_timezone() {
        // 2024-10-01 21:00:00 UTC, city at UTC+2.
        let body = r#"{
            "city": { "name": "Stockholm", "timezone": 7200 },
            "list": [{
                "dt": 1727816400,
                "main": { "temp": 8.0, "feels_like": 6.5, "temp_min": 7.0, "temp_max": 9.0 },
                "weather": [{ "id": 801, "description": "få moln" }]
            }]
        }"#;

        let forecast = parse_forecast(body).expect("valid payload");
        let sample = &forecast.samples[0];

        assert_eq!(forecast.city, "Stockholm");
        assert_eq!(sample.timestamp.hour(), 23);
        assert_eq!(sample.date(), NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(sample.temp_min, 7.0);
        assert_eq!(sample.temp_max, 9.0);
        assert_eq!(sample.code, 801);
    }

    #[test]
    fn forecast_falls_back_to_dt_txt() {
        let body = r#"{
            "city": { "name": "Malmö" },
            "list": [{
                "dt_txt": "2024-10-02 03:00:00",
                "main": { "temp": 5.0, "feels_like": 3.0, "temp_min": 4.0, "temp_max": 6.0 },
                "weather": [{ "id": 800, "description": "klar himmel" }]
            }]
        }"#;

        let forecast = parse_forecast(body).expect("valid payload");
        let sample = &forecast.samples[0];

        assert_eq!(sample.timestamp.hour(), 3);
        assert_eq!(sample.date(), NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
    }

    #[test]
    fn forecast_without_any_timestamp_is_malformed() {
        let body = r#"{
            "city": { "name": "Malmö" },
            "list": [{
                "main": { "temp": 5.0, "feels_like": 3.0, "temp_min": 4.0, "temp_max": 6.0 },
                "weather": [{ "id": 800, "description": "klar himmel" }]
            }]
        }"#;

        let err = parse_forecast(body).unwrap_err();
        assert!(err.to_string().contains("list[0]"));
    }

    #[test]
    fn historical_reads_max_and_min_independently() {
        let body = r#"{
            "data": {
                "request": [{ "type": "City", "query": "Uppsala, Sweden" }],
                "weather": [{
                    "date": "2020-07-01",
                    "maxtempC": "24",
                    "mintempC": "13",
                    "sunHour": "14.5"
                }]
            }
        }"#;

        let report = parse_historical(body).expect("valid payload");

        assert_eq!(report.query, "Uppsala, Sweden");
        assert_eq!(report.date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
        assert_eq!(report.max_temp, 24.0);
        assert_eq!(report.min_temp, 13.0);
        assert_eq!(report.sun_hours, 14.5);
    }

    #[test]
    fn historical_without_days_is_malformed() {
        let body = r#"{ "data": { "request": [{ "query": "X" }], "weather": [] } }"#;
        let err = parse_historical(body).unwrap_err();

        assert!(err.to_string().contains("data.weather is empty"));
    }
}
