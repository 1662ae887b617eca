//! AQI classification
//!
//! Two fixed banding schemes over the same thresholds (50/100/150): the health
//! risk label used to colour the risk scatter, and the category names used by
//! the category bar chart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health risk for a single AQI reading, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl HealthRisk {
    /// All levels from least to most severe
    pub const ALL: [HealthRisk; 4] = [
        HealthRisk::Low,
        HealthRisk::Moderate,
        HealthRisk::High,
        HealthRisk::VeryHigh,
    ];

    /// Classify an AQI value; upper thresholds are inclusive
    #[must_use]
    pub fn classify(aqi: u32) -> Self {
        match aqi {
            0..=50 => HealthRisk::Low,
            51..=100 => HealthRisk::Moderate,
            101..=150 => HealthRisk::High,
            _ => HealthRisk::VeryHigh,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HealthRisk::Low => "Low Risk",
            HealthRisk::Moderate => "Moderate Risk",
            HealthRisk::High => "High Risk",
            HealthRisk::VeryHigh => "Very High Risk",
        }
    }
}

impl fmt::Display for HealthRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// AQI category shown on the category bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 4] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::Unhealthy,
        AqiCategory::Hazardous,
    ];

    #[must_use]
    pub fn classify(aqi: u32) -> Self {
        match HealthRisk::classify(aqi) {
            HealthRisk::Low => AqiCategory::Good,
            HealthRisk::Moderate => AqiCategory::Moderate,
            HealthRisk::High => AqiCategory::Unhealthy,
            HealthRisk::VeryHigh => AqiCategory::Hazardous,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Position in [`AqiCategory::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Count readings per category, in [`AqiCategory::ALL`] order
#[must_use]
pub fn category_counts(values: &[u32]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for &aqi in values {
        counts[AqiCategory::classify(aqi).index()] += 1;
    }
    counts
}
