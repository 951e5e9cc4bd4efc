//! Error types and handling for the `Airsight` dashboard core

use thiserror::Error;

/// Main error type for the `Airsight` dashboard core
#[derive(Error, Debug)]
pub enum AirsightError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast service communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The forecast service returned a zero-length series
    #[error("Forecast service returned an empty series")]
    EmptySeries,

    /// A city outside the supported set was requested
    #[error("Unknown city: {city}")]
    UnknownCity { city: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AirsightError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new unknown-city error
    pub fn unknown_city<S: Into<String>>(city: S) -> Self {
        Self::UnknownCity { city: city.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirsightError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AirsightError::Api { .. } => {
                "Unable to reach the forecast service. Please check your connection and try again."
                    .to_string()
            }
            AirsightError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AirsightError::EmptySeries => {
                "The forecast service returned no data for this city.".to_string()
            }
            AirsightError::UnknownCity { city } => {
                format!("'{city}' is not a supported city.")
            }
            AirsightError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
