//! Configuration management
//!
//! Configuration is loaded from a `config.yml` file with environment
//! variable overrides. Missing files or fields fall back to sensible
//! defaults, so the portal runs with no configuration at all against a
//! local API.

use serde::{Deserialize, Serialize};

use crate::session::CookieSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote academic API, including the common path
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie lifetime in days
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
    /// Set the Secure attribute (enable behind HTTPS)
    #[serde(default)]
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            secure: false,
        }
    }
}

fn default_max_age_days() -> u32 {
    7
}

impl SessionConfig {
    /// Cookie attributes derived from this section
    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings {
            max_age_seconds: i64::from(self.max_age_days) * 24 * 60 * 60,
            secure: self.secure,
        }
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file returns the default configuration; an
    /// invalid one returns an error with the YAML location.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Recognized variables:
    /// - AULA_SERVER_HOST
    /// - AULA_SERVER_PORT
    /// - AULA_API_BASE_URL
    /// - AULA_SESSION_MAX_AGE_DAYS
    /// - AULA_SESSION_SECURE
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("AULA_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("AULA_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(base_url) = std::env::var("AULA_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Ok(days) = std::env::var("AULA_SESSION_MAX_AGE_DAYS") {
            if let Ok(days) = days.parse::<u32>() {
                self.session.max_age_days = days;
            }
        }
        if let Ok(secure) = std::env::var("AULA_SESSION_SECURE") {
            match secure.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.session.secure = true,
                "false" | "0" | "no" => self.session.secure = false,
                _ => {} // Ignore invalid values
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
