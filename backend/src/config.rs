//! Relay configuration and environment variable handling.
//!
//! Configuration is resolved once at startup and injected into the HTTP
//! state, so handlers never read the process environment themselves.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable holding the upstream (Apps Script) base URL.
pub const UPSTREAM_URL_ENV: &str = "GAS_API_URL";
/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
    #[error("Unsupported locale '{0}'. Use ja or en.")]
    UnsupportedLocale(String),
}

/// Language used for user-facing hints and fallback labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Locale::Ja),
            "en" | "en-us" | "english" => Ok(Locale::En),
            other => Err(ConfigError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Relay configuration, loaded from an optional TOML file and the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Upstream base URL. Absence is reported per request, not at startup.
    #[serde(default)]
    pub upstream_url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub locale: Locale,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: None,
            host: default_host(),
            port: default_port(),
            locale: Locale::default(),
        }
    }
}

impl RelayConfig {
    /// Configuration pointing at the given upstream with default server settings.
    pub fn with_upstream(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: Some(upstream_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration the way the server binary does.
    ///
    /// Starts from `RELAY_CONFIG` (or `relay.toml` in a standard location, if
    /// present), then overlays environment variables:
    /// - `GAS_API_URL`: upstream base URL
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 8080)
    /// - `RELAY_LOCALE` (`ja` | `en`, default: ja)
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        base.apply_env(|key| env::var(key).ok())
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search for `relay.toml` in the current and `backend/` directories.
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("relay.toml"),
            PathBuf::from("backend/relay.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Overlay values from an environment lookup onto this configuration.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(UPSTREAM_URL_ENV) {
            self.upstream_url = Some(url);
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(locale) = lookup("RELAY_LOCALE") {
            self.locale = locale.parse()?;
        }
        Ok(self)
    }

    /// The upstream base URL, treating an empty value as unset.
    pub fn upstream_url(&self) -> Option<&str> {
        self.upstream_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
