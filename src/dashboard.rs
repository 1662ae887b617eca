//! Dashboard render cycle
//!
//! A submitted form is either still awaiting input or ready to render. A
//! render regenerates the simulated series, draws the five charts on a
//! blocking worker and, concurrently, runs the live lookup followed by the
//! advisory call. Nothing carries over from one render to the next.

use chrono::NaiveDate;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::advisory::{AdvisoryClient, build_prompt};
use crate::charts::{self, RenderedChart};
use crate::config::AirAwareConfig;
use crate::error::{AirAwareError, LookupError};
use crate::models::{LocationQuery, WeatherSnapshot};
use crate::series::{AqiSeries, SyntheticWeather, generate_series, synthetic_weather};
use crate::weather::OpenWeatherClient;

/// The three free-text fields of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardForm {
    pub city: String,
    pub area: String,
    pub disease: String,
}

/// A form with every field filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub query: LocationQuery,
    pub disease: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// At least one field is blank
    AwaitingInput,
    /// All fields present; a render can start
    Rendering(Submission),
}

impl DashboardForm {
    #[must_use]
    pub fn new<C: Into<String>, A: Into<String>, D: Into<String>>(
        city: C,
        area: A,
        disease: D,
    ) -> Self {
        Self {
            city: city.into(),
            area: area.into(),
            disease: disease.into(),
        }
    }

    /// Whitespace-only fields count as blank
    #[must_use]
    pub fn state(&self) -> DashboardState {
        let city = self.city.trim();
        let area = self.area.trim();
        let disease = self.disease.trim();

        if city.is_empty() || area.is_empty() || disease.is_empty() {
            return DashboardState::AwaitingInput;
        }

        DashboardState::Rendering(Submission {
            query: LocationQuery::new(city, area),
            disease: disease.to_string(),
        })
    }
}

/// Simulated inputs for the charts of one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub series: AqiSeries,
    pub weather: SyntheticWeather,
}

impl Simulation {
    pub fn generate<R: RngExt>(rng: &mut R, today: NaiveDate) -> Self {
        let series = generate_series(rng, today);
        let weather = synthetic_weather(rng);
        Self { series, weather }
    }
}

/// Outcome of the live lookup and, when it succeeded, the advisory call
#[derive(Debug)]
pub enum LiveReport {
    Ready {
        snapshot: WeatherSnapshot,
        advisory: crate::Result<String>,
    },
    Failed(LookupError),
}

impl LiveReport {
    /// Text blocks in display order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            LiveReport::Ready { snapshot, advisory } => {
                let advisory = match advisory {
                    Ok(text) => text.clone(),
                    Err(err) => err.user_message(),
                };
                vec![
                    "Weather & AQI Information".to_string(),
                    snapshot.format_weather(),
                    snapshot.format_aqi(),
                    "Precautionary Measures:".to_string(),
                    advisory,
                ]
            }
            LiveReport::Failed(err) => vec![err.to_string()],
        }
    }
}

/// Everything one render produces
#[derive(Debug)]
pub struct DashboardPage {
    pub submission: Submission,
    pub charts: Vec<RenderedChart>,
    pub report: LiveReport,
}

/// Clients needed for a render, built once at startup
#[derive(Clone)]
pub struct Dashboard {
    weather: OpenWeatherClient,
    advisor: AdvisoryClient,
}

impl Dashboard {
    pub fn new(weather: OpenWeatherClient, advisor: AdvisoryClient) -> Self {
        Self { weather, advisor }
    }

    pub fn from_config(config: &AirAwareConfig) -> crate::Result<Self> {
        Ok(Self::new(
            OpenWeatherClient::new(&config.openweather)?,
            AdvisoryClient::from_config(&config.advisory)?,
        ))
    }

    /// Run one render cycle for a complete submission
    #[instrument(skip(self, simulation), fields(city = %submission.query.city, area = %submission.query.area))]
    pub async fn render(
        &self,
        submission: Submission,
        simulation: Simulation,
    ) -> crate::Result<DashboardPage> {
        let Simulation { series, weather } = simulation;
        let charts = tokio::task::spawn_blocking(move || charts::render_all(&series, &weather));

        let (charts, report) = tokio::join!(charts, self.live_report(&submission));

        let charts = charts
            .map_err(|e| AirAwareError::chart(format!("chart worker failed: {e}")))??;

        info!("Rendered {} charts", charts.len());
        Ok(DashboardPage {
            submission,
            charts,
            report,
        })
    }

    async fn live_report(&self, submission: &Submission) -> LiveReport {
        let snapshot = match self.weather.lookup(&submission.query).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Live lookup failed: {}", err);
                return LiveReport::Failed(err);
            }
        };

        let prompt = build_prompt(&submission.query, &snapshot, &submission.disease);
        let advisory = self.advisor.advise(&prompt).await;
        if let Err(err) = &advisory {
            warn!("Advisory failed: {}", err);
        }

        LiveReport::Ready { snapshot, advisory }
    }
}
