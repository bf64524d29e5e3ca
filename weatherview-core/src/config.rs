use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    geolocation::DEFAULT_GEOIP_URL, model::Coordinates, provider::openweather::DEFAULT_BASE_URL,
};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "WEATHERVIEW_API_KEY";

/// Credentials and endpoint for OpenWeather.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,

    /// Defaults to the public OpenWeather host.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Resolve the position from the public IP address.
    #[default]
    Ip,
    /// Use the configured latitude/longitude.
    Fixed,
    /// Never locate; the user types a place instead.
    Off,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationMode::Ip => "ip",
            LocationMode::Fixed => "fixed",
            LocationMode::Off => "off",
        }
    }

    pub const fn all() -> &'static [LocationMode] {
        &[LocationMode::Ip, LocationMode::Fixed, LocationMode::Off]
    }
}

impl std::fmt::Display for LocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub mode: LocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub geoip_url: Option<String>,
}

impl LocationConfig {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
///
/// [location]
/// mode = "ip"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openweather: ProviderConfig,

    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.openweather
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn base_url(&self) -> &str {
        self.openweather.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn geoip_url(&self) -> &str {
        self.location.geoip_url.as_deref().unwrap_or(DEFAULT_GEOIP_URL)
    }

    /// Replace the stored key with a non-empty environment value.
    pub fn apply_env_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.openweather.api_key = Some(key);
        }
    }

    /// Load config from the platform location, or defaults on first run.
    /// `WEATHERVIEW_API_KEY` takes precedence over the stored key.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&Self::config_file_path()?)?;
        cfg.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where the interactive view writes its log.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().join("weatherview.log"))
    }
}
