//! Configuration management for the `Airsight` dashboard
//!
//! Handles loading configuration from files and environment variables,
//! and validates all settings before they reach the HTTP client.

use crate::AirsightError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Airsight` dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirsightConfig {
    /// Forecast service configuration
    pub forecast: ForecastServiceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Forecast service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastServiceConfig {
    /// Base URL for the forecast service
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_forecast_timeout")]
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

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// City preselected in the dashboard
    #[serde(default = "default_city")]
    pub city: String,
    /// Port the web read-side listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_forecast_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "Delhi".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for AirsightConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastServiceConfig {
                base_url: default_forecast_base_url(),
                timeout_seconds: default_forecast_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            defaults: DefaultsConfig {
                city: default_city(),
                port: default_port(),
            },
        }
    }
}

impl AirsightConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with AIRSIGHT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("AIRSIGHT")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AirsightConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airsight").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.forecast.timeout_seconds == 0 {
            self.forecast.timeout_seconds = default_forecast_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.city.is_empty() {
            self.defaults.city = default_city();
        }
        if self.defaults.port == 0 {
            self.defaults.port = default_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.forecast.timeout_seconds > 300 {
            return Err(AirsightError::config(
                "Forecast service timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if !self.forecast.base_url.starts_with("http://")
            && !self.forecast.base_url.starts_with("https://")
        {
            return Err(AirsightError::config(
                "Forecast service base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirsightError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirsightError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        // The default city must parse into the supported set
        self.defaults
            .city
            .parse::<crate::models::City>()
            .map_err(|e| AirsightError::config(format!("Invalid default city: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AirsightConfig::default();
        assert_eq!(config.forecast.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.forecast.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.city, "Delhi");
        assert_eq!(config.defaults.port, 8080);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AirsightConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AirsightConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = AirsightConfig::default();
        config.forecast.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = AirsightConfig::default();
        config.forecast.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_unknown_default_city() {
        let mut config = AirsightConfig::default();
        config.defaults.city = "Atlantis".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Atlantis"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = AirsightConfig::default();
        config.forecast.base_url = String::new();
        config.defaults.port = 0;
        config.apply_defaults();
        assert_eq!(config.forecast.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.defaults.port, 8080);
    }

    #[test]
    fn test_config_path_generation() {
        let path = AirsightConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("airsight"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
