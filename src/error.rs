//! Error types and handling for the Air Aware dashboard

use std::fmt;

use thiserror::Error;

/// Upstream endpoint a lookup step talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocode,
    Weather,
    AirPollution,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Endpoint::Geocode => "geocode data",
            Endpoint::Weather => "weather",
            Endpoint::AirPollution => "AQI",
        };
        f.write_str(label)
    }
}

/// Failure of the live location → weather → air pollution chain
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Non-success status from one of the OpenWeather endpoints
    #[error("Error fetching {endpoint}: {body}")]
    Upstream {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// Geocoding returned an empty result set
    #[error(
        "No geocode data found for the specified area: {area}, {city}. Please ensure that the location is correct."
    )]
    NotFound { area: String, city: String },

    /// Transport, decoding or shape errors anywhere in the chain
    #[error("Error occurred: {message}")]
    Unexpected { message: String },
}

impl LookupError {
    pub fn upstream<S: Into<String>>(endpoint: Endpoint, status: u16, body: S) -> Self {
        Self::Upstream {
            endpoint,
            status,
            body: body.into(),
        }
    }

    pub fn not_found<A: Into<String>, C: Into<String>>(area: A, city: C) -> Self {
        Self::NotFound {
            area: area.into(),
            city: city.into(),
        }
    }

    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

// The request URL carries the API key, so it never reaches the message
impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::unexpected(err.without_url().to_string())
    }
}

/// Main error type for the Air Aware application
#[derive(Error, Debug)]
pub enum AirAwareError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Live weather/AQI lookup errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Language-model call errors
    #[error("Advisory error: {message}")]
    Advisory { message: String },

    /// Chart drawing errors
    #[error("Chart rendering error: {message}")]
    Chart { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AirAwareError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new advisory error
    pub fn advisory<S: Into<String>>(message: S) -> Self {
        Self::Advisory {
            message: message.into(),
        }
    }

    /// Create a new chart error
    pub fn chart<S: Into<String>>(message: S) -> Self {
        Self::Chart {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirAwareError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            AirAwareError::Lookup(err) => err.to_string(),
            AirAwareError::Advisory { .. } => {
                "Unable to get precautionary measures right now. Please try again later."
                    .to_string()
            }
            AirAwareError::Chart { message } => format!("Unable to draw charts: {message}"),
            AirAwareError::Validation { message } => format!("Invalid input: {message}"),
            AirAwareError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_messages() {
        let err = LookupError::upstream(Endpoint::Geocode, 401, "Invalid API key");
        assert_eq!(err.to_string(), "Error fetching geocode data: Invalid API key");

        let err = LookupError::upstream(Endpoint::Weather, 500, "boom");
        assert_eq!(err.to_string(), "Error fetching weather: boom");

        let err = LookupError::upstream(Endpoint::AirPollution, 502, "bad gateway");
        assert_eq!(err.to_string(), "Error fetching AQI: bad gateway");

        let err = LookupError::not_found("Void", "Nowhere");
        assert!(err.to_string().contains("Void, Nowhere"));

        let err = LookupError::unexpected("connection reset");
        assert_eq!(err.to_string(), "Error occurred: connection reset");
    }

    #[test]
    fn test_error_creation() {
        let config_err = AirAwareError::config("missing API key");
        assert!(matches!(config_err, AirAwareError::Config { .. }));

        let advisory_err = AirAwareError::advisory("timed out");
        assert!(matches!(advisory_err, AirAwareError::Advisory { .. }));

        let lookup_err: AirAwareError = LookupError::not_found("Soho", "London").into();
        assert!(matches!(
            lookup_err,
            AirAwareError::Lookup(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_user_messages() {
        let config_err = AirAwareError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let lookup_err: AirAwareError = LookupError::not_found("Void", "Nowhere").into();
        assert!(lookup_err.user_message().contains("Void"));

        let validation_err = AirAwareError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AirAwareError = io_err.into();
        assert!(matches!(err, AirAwareError::Io { .. }));
    }
}
