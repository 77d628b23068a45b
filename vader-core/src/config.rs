use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{
    model::Units,
    present::{CURRENT_WIDTH, FORECAST_WIDTH, HISTORICAL_WIDTH},
    provider::ProviderId,
};

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Box content widths per report kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widths {
    pub current: usize,
    pub forecast: usize,
    pub historical: usize,
}

impl Default for Widths {
    fn default() -> Self {
        Self { current: CURRENT_WIDTH, forecast: FORECAST_WIDTH, historical: HISTORICAL_WIDTH }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit system used when none is given on the command line.
    pub units: Units,

    /// Language code for provider descriptions.
    pub lang: String,

    pub widths: Widths,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: Units::default(),
            lang: "sv".to_string(),
            widths: Widths::default(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::info!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "vader", "vader-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the API key of a provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some_and(|key| !key.trim().is_empty())
    }

    /// API key of a provider, or an error telling the user how to add one.
    pub fn require_api_key(&self, provider_id: ProviderId) -> Result<&str> {
        self.provider_api_key(provider_id).filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured for provider '{provider_id}'.\n\
                 Hint: run `vader configure {provider_id}` and enter your API key."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_widths() {
        let cfg = Config::default();

        assert_eq!(cfg.units, Units::Metric);
        assert_eq!(cfg.lang, "sv");
        assert_eq!(cfg.widths, Widths { current: 45, forecast: 45, historical: 40 });
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml(
            r#"
            units = "imperial"

            [widths]
            forecast = 38

            [providers.openweather]
            api_key = "OPEN_KEY"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.lang, "sv");
        assert_eq!(cfg.widths.forecast, 38);
        assert_eq!(cfg.widths.current, 45);
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
    }

    #[test]
    fn invalid_units_fail_to_parse() {
        assert!(Config::from_toml(r#"units = "kelvin""#).is_err());
    }

    #[test]
    fn set_api_key_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
        assert!(cfg.is_provider_configured(ProviderId::OpenWeather));
        assert!(!cfg.is_provider_configured(ProviderId::WorldWeatherOnline));
    }

    #[test]
    fn upsert_replaces_existing_key() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WorldWeatherOnline, "OLD".into());
        cfg.upsert_provider_api_key(ProviderId::WorldWeatherOnline, "NEW".into());

        assert_eq!(cfg.require_api_key(ProviderId::WorldWeatherOnline).unwrap(), "NEW");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "  ".into());

        let err = cfg.require_api_key(ProviderId::OpenWeather).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider 'openweather'"));
        assert!(err.to_string().contains("vader configure openweather"));
    }
}
