//! Location query and geocoded coordinates

use serde::{Deserialize, Serialize};

/// A city + area pair as submitted by the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub area: String,
}

impl LocationQuery {
    #[must_use]
    pub fn new<C: Into<String>, A: Into<String>>(city: C, area: A) -> Self {
        Self {
            city: city.into(),
            area: area.into(),
        }
    }

    /// Directory lookup string, area first: `"{area},{city}"`
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{},{}", self.area, self.city)
    }
}

/// Coordinates resolved for a location query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Place name reported by the directory, if any
    pub name: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl GeocodeResult {
    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
