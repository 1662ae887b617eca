//! Live weather and PM2.5 snapshot

use serde::{Deserialize, Serialize};

/// Current conditions for a geocoded location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Human-readable description of weather conditions
    pub description: String,
    /// PM2.5 concentration in μg/m³
    pub pm2_5: f64,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new<S: Into<String>>(description: S, pm2_5: f64) -> Self {
        Self {
            description: description.into(),
            pm2_5,
        }
    }

    #[must_use]
    pub fn format_weather(&self) -> String {
        format!("Weather: {}", self.description)
    }

    #[must_use]
    pub fn format_aqi(&self) -> String {
        format!("AQI: {}", format_pm2_5(self.pm2_5))
    }
}

/// Render a concentration the way it reads in the upstream JSON.
///
/// Whole numbers keep one decimal (`42.0`), everything else uses the shortest
/// round-trip form (`37.52`).
#[must_use]
pub fn format_pm2_5(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(42.0, "42.0")]
    #[case(37.52, "37.52")]
    #[case(0.0, "0.0")]
    #[case(5.0, "5.0")]
    #[case(3.1, "3.1")]
    fn test_format_pm2_5(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_pm2_5(value), expected);
    }

    #[test]
    fn test_display_lines() {
        let snapshot = WeatherSnapshot::new("clear sky", 42.0);
        assert_eq!(snapshot.format_weather(), "Weather: clear sky");
        assert_eq!(snapshot.format_aqi(), "AQI: 42.0");
    }
}
