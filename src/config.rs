//! Configuration management
//!
//! Server address and data file locations. Values come from built-in
//! defaults, then an optional TOML file, then command-line flags (which
//! also read `PORT` from the environment).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Glossary and history locations
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file with Concept and Definition columns
    #[serde(default = "default_glossary_path")]
    pub glossary_path: PathBuf,
    /// JSON file recording which concept was shown on which day
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_glossary_path() -> PathBuf {
    PathBuf::from("PM_Glossary_Fixed.csv")
}

fn default_history_path() -> PathBuf {
    PathBuf::from("shown_history.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            glossary_path: default_glossary_path(),
            history_path: default_history_path(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub glossary_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the platform config file is
    /// used when present, and defaults when not. Nothing is written.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file does not exist: {}", path.display());
                }
                path.to_path_buf()
            }
            None => match config_path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(path) = overrides.glossary_path {
            self.data.glossary_path = path;
        }
        if let Some(path) = overrides.history_path {
            self.data.history_path = path;
        }
        self
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "daily-concept", "daily-concept")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}
