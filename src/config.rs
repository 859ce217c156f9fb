//! Configuration management for fireberry-mcp.
//!
//! Configuration comes from an optional toml file at
//! `~/.fireberry-mcp/config.toml`, with environment variables taking
//! precedence (`FIREBERRY_BASE_URL`, `FIREBERRY_TOKEN_ID`,
//! `FIREBERRY_LOG_LEVEL`). The token is the only required value; the base
//! URL defaults to the production endpoint.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.fireberry.com";

const ENV_BASE_URL: &str = "FIREBERRY_BASE_URL";
const ENV_TOKEN_ID: &str = "FIREBERRY_TOKEN_ID";
const ENV_LOG_LEVEL: &str = "FIREBERRY_LOG_LEVEL";

/// Log verbosity, ordered from most to least chatty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The tracing filter directive for this level.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub token_id: String,
    pub log_level: LogLevel,
}

/// What the config file may contain. Everything is optional there.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    token_id: Option<String>,
    #[serde(default)]
    log_level: Option<LogLevel>,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".fireberry-mcp").join("config.toml"))
    }

    /// Load configuration from the optional file and the environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let file = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;
            toml::from_str(&content).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?
        } else {
            FileConfig::default()
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Resolve file values and an environment lookup into a config.
    /// Environment always wins over the file.
    fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_url = env(ENV_BASE_URL)
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let token_id = match env(ENV_TOKEN_ID).or(file.token_id) {
            Some(token) if !token.is_empty() => token,
            _ => bail!(
                "Missing API token: set {ENV_TOKEN_ID} or token_id in the config file"
            ),
        };

        let log_level = match env(ENV_LOG_LEVEL) {
            Some(value) => match LogLevel::parse(&value) {
                Some(level) => level,
                None => bail!(
                    "Invalid {ENV_LOG_LEVEL}: '{value}' (expected debug, info, warn or error)"
                ),
            },
            None => file.log_level.unwrap_or(LogLevel::Info),
        };

        Ok(Self {
            base_url,
            token_id,
            log_level,
        })
    }
}
