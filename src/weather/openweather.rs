//! OpenWeather API response structures
//!
//! Only the fields the dashboard reads are modelled; everything else in the
//! payloads is ignored.

use serde::Deserialize;

use crate::models::GeocodeResult;

/// Fallback when the weather payload carries no condition description
pub const NO_WEATHER_INFO: &str = "No weather info";

/// One entry of the direct geocoding response array
#[derive(Debug, Deserialize)]
pub struct GeocodingEntry {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl From<GeocodingEntry> for GeocodeResult {
    fn from(entry: GeocodingEntry) -> Self {
        let name = match (entry.name, entry.state) {
            (Some(name), Some(state)) => Some(format!("{name}, {state}")),
            (name, _) => name,
        };
        GeocodeResult {
            latitude: entry.lat,
            longitude: entry.lon,
            name,
            country: entry.country,
        }
    }
}

/// Current weather response (`/data/2.5/weather`)
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: Option<String>,
}

impl WeatherResponse {
    /// Description of the first reported condition
    #[must_use]
    pub fn description(&self) -> String {
        self.weather
            .first()
            .and_then(|condition| condition.description.clone())
            .unwrap_or_else(|| NO_WEATHER_INFO.to_string())
    }
}

/// Air pollution response (`/data/2.5/air_pollution`)
#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<PollutionRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionRecord {
    pub components: Option<Components>,
}

/// Pollutant concentrations in μg/m³
#[derive(Debug, Deserialize)]
pub struct Components {
    pub pm2_5: Option<f64>,
}

impl AirPollutionResponse {
    /// PM2.5 of the first record, if the payload has one
    #[must_use]
    pub fn pm2_5(&self) -> Option<f64> {
        self.list
            .first()
            .and_then(|record| record.components.as_ref())
            .and_then(|components| components.pm2_5)
    }
}
