use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the access token when none is configured.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Mapbox geocoding dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Dataset {
    /// Temporary geocoding, results may not be stored
    #[default]
    #[serde(rename = "mapbox.places")]
    #[value(name = "mapbox.places")]
    Places,
    /// Permanent geocoding, results may be stored
    #[serde(rename = "mapbox.places-permanent")]
    #[value(name = "mapbox.places-permanent")]
    PlacesPermanent,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Places => "mapbox.places",
            Dataset::PlacesPermanent => "mapbox.places-permanent",
        }
    }
}

fn default_host() -> String {
    "api.mapbox.com".to_string()
}
fn default_use_ssl() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}

/// Provider configuration, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapboxConfig {
    /// ISO 3166 country filter, sent as `country`
    #[serde(default)]
    pub country: Option<String>,
    /// Proximity bias. Accepted and kept, but not sent with requests.
    #[serde(default)]
    pub proximity: Option<String>,
    /// Use `https` instead of `http`
    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,
    /// API host, optionally with a port
    #[serde(default = "default_host")]
    pub host: String,
    /// Sent as `access_token` when present
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub dataset: Dataset,
    /// Only read by the reqwest transport
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            country: None,
            proximity: None,
            use_ssl: default_use_ssl(),
            host: default_host(),
            access_token: None,
            dataset: Dataset::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MapboxConfig {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token,
            ..Default::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_proximity(mut self, proximity: impl Into<String>) -> Self {
        self.proximity = Some(proximity.into());
        self
    }

    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_ssl { "https" } else { "http" }
    }
}

fn default_verbose() -> bool {
    false
}

/// Settings read from a TOML file. Every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub proximity: Option<String>,
    #[serde(default)]
    pub use_ssl: Option<bool>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub dataset: Option<Dataset>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

impl FileConfig {
    /// Load the first config file found in the standard locations.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists() {
                match Self::from_path(&path) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        log::warn!("Failed to load config file {:?}: {:#}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Fill a provider config from this file, leaving unset fields at their defaults.
    pub fn to_mapbox_config(&self) -> MapboxConfig {
        let defaults = MapboxConfig::default();
        MapboxConfig {
            country: self.country.clone(),
            proximity: self.proximity.clone(),
            use_ssl: self.use_ssl.unwrap_or(defaults.use_ssl),
            host: self.host.clone().unwrap_or(defaults.host),
            access_token: self.access_token.clone(),
            dataset: self.dataset.unwrap_or(defaults.dataset),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("mapbox-geocoder.toml"));
    paths.push(PathBuf::from(".mapbox-geocoder.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mapbox-geocoder").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".mapbox-geocoder.toml"));
    }

    paths
}
