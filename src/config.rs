//! Configuration management for the Air Aware dashboard
//!
//! Handles loading configuration from files and environment variables and
//! validates it before any client is built. Both API keys are required, so a
//! missing key stops the process at startup rather than on the first request.

use crate::AirAwareError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fallback variable for the OpenWeather key
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";
/// Fallback variable for the Groq key
pub const GROQ_KEY_VAR: &str = "GROQ_API_KEY";

/// Root configuration structure for the Air Aware application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirAwareConfig {
    /// OpenWeather API configuration
    #[serde(default)]
    pub openweather: OpenWeatherConfig,
    /// Language-model API configuration
    #[serde(default)]
    pub advisory: AdvisoryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// OpenWeather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// OpenWeather API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL shared by the geocoding, weather and air pollution endpoints
    #[serde(default = "default_openweather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Language-model API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Groq API key
    #[serde(default)]
    pub api_key: String,
    /// OpenAI-compatible base URL
    #[serde(default = "default_advisory_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_advisory_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openweather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_advisory_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AirAwareConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::read_sources(config_path)?;

        config.apply_key_fallbacks(
            std::env::var(OPENWEATHER_KEY_VAR).ok(),
            std::env::var(GROQ_KEY_VAR).ok(),
        );
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Build the layered file + `AIRAWARE_` environment configuration without validating it
    fn read_sources(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. AIRAWARE_OPENWEATHER__API_KEY, AIRAWARE_SERVER__PORT
        builder = builder.add_source(
            Environment::with_prefix("AIRAWARE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airaware").join("config.toml"))
    }

    /// Fill empty keys from the plain `OPENWEATHER_API_KEY` / `GROQ_API_KEY` variables
    pub fn apply_key_fallbacks(&mut self, openweather: Option<String>, groq: Option<String>) {
        if self.openweather.api_key.is_empty() {
            if let Some(key) = openweather {
                self.openweather.api_key = key;
            }
        }
        if self.advisory.api_key.is_empty() {
            if let Some(key) = groq {
                self.advisory.api_key = key;
            }
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.openweather.base_url.is_empty() {
            self.openweather.base_url = default_openweather_base_url();
        }
        if self.openweather.timeout_seconds == 0 {
            self.openweather.timeout_seconds = default_timeout();
        }
        if self.advisory.base_url.is_empty() {
            self.advisory.base_url = default_advisory_base_url();
        }
        if self.advisory.model.is_empty() {
            self.advisory.model = default_model();
        }
        if self.advisory.timeout_seconds == 0 {
            self.advisory.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.openweather.api_key.trim().is_empty() {
            return Err(AirAwareError::config(format!(
                "OpenWeather API key is missing. Set AIRAWARE_OPENWEATHER__API_KEY or {OPENWEATHER_KEY_VAR}."
            ))
            .into());
        }

        if self.advisory.api_key.trim().is_empty() {
            return Err(AirAwareError::config(format!(
                "Groq API key is missing. Set AIRAWARE_ADVISORY__API_KEY or {GROQ_KEY_VAR}."
            ))
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.openweather.timeout_seconds > 300 {
            return Err(
                AirAwareError::config("OpenWeather timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.advisory.timeout_seconds > 300 {
            return Err(AirAwareError::config("Advisory timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirAwareError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirAwareError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("OpenWeather", &self.openweather.base_url),
            ("Advisory", &self.advisory.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AirAwareError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
