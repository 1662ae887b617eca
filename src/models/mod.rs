//! Data models for the Air Aware dashboard
//!
//! Every value here lives for a single render:
//! - Location: the submitted query and its geocoded coordinates
//! - Weather: the live weather/PM2.5 snapshot

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{GeocodeResult, LocationQuery};
pub use weather::{WeatherSnapshot, format_pm2_5};
