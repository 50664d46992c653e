//! Process configuration, read once at startup from YAML.
//!
//! Covers how the server listens and where runtime settings live. The arr
//! URIs, keys and policy flags are not here: they belong to
//! [`crate::settings`] and can change while the server runs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            settings_path: default_settings_path(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("config-data/config.json")
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bound on admin and health requests. Webhook routes are exempt.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Bound on each outbound Radarr/Sonarr call.
    #[serde(default = "default_arr_timeout")]
    pub arr_timeout_seconds: u64,
    /// Optional admin API token. If set, admin endpoints require it as a
    /// bearer token. If not set, admin endpoints are open.
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            arr_timeout_seconds: default_arr_timeout(),
            admin_token: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    300
}

fn default_arr_timeout() -> u64 {
    60
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}
