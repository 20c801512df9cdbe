//! Command-line flags, the optional TOML config file, and the resolved
//! settings the app runs with.
//!
//! Precedence: CLI flag, then config file, then built-in default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use thiserror::Error;

use crate::search::{LocationCatalog, LocationSuggestion, DEFAULT_SEARCH_LATENCY};
use crate::weather::{TempUnit, DEFAULT_WEATHER_LATENCY};

const APP_DIR: &str = "skyforecast";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "skyforecast.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where search suggestions come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Built-in recent and popular lists
    #[default]
    Static,
    /// Open-Meteo geocoding API
    OpenMeteo,
}

/// SkyForecast - weather at a glance, in your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "skyforecast", version)]
#[command(about = "Search locations and view the forecast in a terminal UI")]
pub struct Args {
    /// Config file (default: <config dir>/skyforecast/config.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Suggestion source
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Simulated latency of the static suggestion source
    #[arg(long)]
    pub search_latency_ms: Option<u64>,

    /// Simulated latency of a weather load
    #[arg(long)]
    pub weather_latency_ms: Option<u64>,

    /// Latitude for reverse geolocation
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude for reverse geolocation
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Show temperatures in Celsius
    #[arg(long)]
    pub celsius: bool,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<SourceKind>,
    pub search_latency_ms: Option<u64>,
    pub weather_latency_ms: Option<u64>,
    pub units: Option<TempUnit>,
    pub log_file: Option<PathBuf>,
    pub recent: Option<Vec<LocationSuggestion>>,
    pub popular: Option<Vec<LocationSuggestion>>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`. A missing file is an error only when `explicit`.
    pub fn load(path: &Path, explicit: bool) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if explicit {
                    Err(ConfigError::Missing(path.to_path_buf()))
                } else {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                    Ok(None)
                }
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(LOG_FILE)
}

/// Everything the app needs, resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub source: SourceKind,
    pub search_latency: Duration,
    pub weather_latency: Duration,
    pub unit: TempUnit,
    pub log_file: PathBuf,
    pub catalog: LocationCatalog,
    /// Coordinates for reverse geolocation
    pub coordinates: Option<(f64, f64)>,
}

impl Settings {
    /// Resolve from CLI flags plus the config file they point at.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let file = match (&args.config, default_config_path()) {
            (Some(path), _) => FileConfig::load(path, true)?,
            (None, Some(path)) => FileConfig::load(&path, false)?,
            (None, None) => None,
        };
        Ok(Self::merge(args, file.unwrap_or_default()))
    }

    pub fn merge(args: &Args, file: FileConfig) -> Self {
        let unit = if args.celsius {
            TempUnit::Celsius
        } else {
            file.units.unwrap_or_default()
        };

        Self {
            source: args.source.or(file.source).unwrap_or_default(),
            search_latency: args
                .search_latency_ms
                .or(file.search_latency_ms)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SEARCH_LATENCY),
            weather_latency: args
                .weather_latency_ms
                .or(file.weather_latency_ms)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_WEATHER_LATENCY),
            unit,
            log_file: args
                .log_file
                .clone()
                .or(file.log_file)
                .unwrap_or_else(default_log_path),
            catalog: LocationCatalog::default().with_overrides(file.recent, file.popular),
            coordinates: args.lat.zip(args.lon),
        }
    }
}
