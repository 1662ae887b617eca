//! Air Aware - AQI, weather and health precautions for a city area
//!
//! This library provides the live OpenWeather lookup, the health-risk
//! classifier, the simulated AQI series with its five charts, the advisory
//! client and the dashboard render cycle that ties them together.

pub mod advisory;
pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod risk;
pub mod series;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisory::{AdvisoryClient, GroqTransport, Transport};
pub use charts::{ChartKind, RenderedChart};
pub use config::AirAwareConfig;
pub use dashboard::{Dashboard, DashboardForm, DashboardPage, DashboardState, LiveReport};
pub use error::{AirAwareError, LookupError};
pub use models::{GeocodeResult, LocationQuery, WeatherSnapshot};
pub use risk::{AqiCategory, HealthRisk};
pub use series::{AqiSeries, SyntheticWeather};
pub use weather::OpenWeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirAwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
