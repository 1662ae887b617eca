//! Simulated AQI history and forecast
//!
//! No historical AQI is fetched; every render draws a fresh series from the
//! random source it is handed. Passing a seeded generator makes the series,
//! and therefore every chart built from it, reproducible.

use chrono::{Days, NaiveDate};
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Number of days on the date axis
pub const SERIES_DAYS: usize = 30;
/// Inclusive lower bound of simulated AQI
pub const AQI_MIN: u32 = 20;
/// Exclusive upper bound of simulated AQI
pub const AQI_MAX: u32 = 200;

/// Thirty days of simulated past and forecast AQI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiSeries {
    /// Calendar days ending today, most recent first
    pub dates: Vec<NaiveDate>,
    pub past: Vec<u32>,
    pub forecast: Vec<u32>,
}

impl AqiSeries {
    /// Day offset relative to the newest date (0, -1, ... -29) for each point
    #[must_use]
    pub fn day_offsets(&self) -> Vec<i32> {
        (0..self.dates.len() as i32).map(|i| -i).collect()
    }

    /// The newest date on the axis
    #[must_use]
    pub fn today(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }
}

/// Simulated weather samples plotted against AQI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticWeather {
    /// Temperature in Celsius, [10, 35)
    pub temperatures: Vec<u32>,
    /// Relative humidity in percent, [30, 90)
    pub humidity: Vec<u32>,
    /// Wind speed in m/s, [1, 15)
    pub wind_speed: Vec<u32>,
}

/// Generate the date axis and two independent AQI sequences
pub fn generate_series<R: RngExt>(rng: &mut R, today: NaiveDate) -> AqiSeries {
    let dates = (0..SERIES_DAYS as u64)
        .map(|i| today.checked_sub_days(Days::new(i)).unwrap_or(NaiveDate::MIN))
        .collect();
    let past = sample(rng, AQI_MIN, AQI_MAX);
    let forecast = sample(rng, AQI_MIN, AQI_MAX);

    AqiSeries {
        dates,
        past,
        forecast,
    }
}

/// Generate weather samples for the weather-vs-AQI chart
pub fn synthetic_weather<R: RngExt>(rng: &mut R) -> SyntheticWeather {
    SyntheticWeather {
        temperatures: sample(rng, 10, 35),
        humidity: sample(rng, 30, 90),
        wind_speed: sample(rng, 1, 15),
    }
}

fn sample<R: RngExt>(rng: &mut R, low: u32, high: u32) -> Vec<u32> {
    (0..SERIES_DAYS).map(|_| rng.random_range(low..high)).collect()
}
