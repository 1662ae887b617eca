//! Chart rendering
//!
//! Five independent routines, each drawing one fixed-size SVG image from the
//! simulated series. Layout (titles, axis labels, legends) only depends on the
//! input, so a seeded series always renders to the same bytes.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::AirAwareError;
use crate::risk::{AqiCategory, HealthRisk};
use crate::series::{AqiSeries, SyntheticWeather};

pub mod categories;
pub mod distribution;
pub mod forecast;
pub mod risk_scatter;
pub mod weather_scatter;

/// Image size in pixels (width, height)
pub const CHART_SIZE: (u32, u32) = (1000, 600);
/// Upper bound of every AQI axis
pub const AQI_AXIS_MAX: u32 = 220;

pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);

pub(crate) const GREEN: RGBColor = RGBColor(0, 128, 0);
pub(crate) const YELLOW: RGBColor = RGBColor(255, 255, 0);
pub(crate) const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub(crate) const RED: RGBColor = RGBColor(255, 0, 0);
pub(crate) const BLUE: RGBColor = RGBColor(0, 0, 255);
pub(crate) const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);

/// The five dashboard charts, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    RiskScatter,
    WeatherScatter,
    Categories,
    Distribution,
    Forecast,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::RiskScatter,
        ChartKind::WeatherScatter,
        ChartKind::Categories,
        ChartKind::Distribution,
        ChartKind::Forecast,
    ];

    /// Title drawn inside the image
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::RiskScatter => "AQI vs Health Risk",
            ChartKind::WeatherScatter => "Weather Parameters vs AQI",
            ChartKind::Categories => "AQI Categories with Color-Coding",
            ChartKind::Distribution => "Health Recommendation Probability Distribution",
            ChartKind::Forecast => "AQI Forecast with Confidence Interval",
        }
    }

    /// Caption shown under the image on the page
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            ChartKind::RiskScatter => "AQI vs Health Risk",
            ChartKind::WeatherScatter => "Weather vs AQI",
            ChartKind::Categories => "AQI Categories",
            ChartKind::Distribution => "Health Recommendation",
            ChartKind::Forecast => "Forecast with Confidence Interval",
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::RiskScatter => "aqi_health_risk.svg",
            ChartKind::WeatherScatter => "weather_vs_aqi.svg",
            ChartKind::Categories => "aqi_categories.svg",
            ChartKind::Distribution => "aqi_distribution.svg",
            ChartKind::Forecast => "aqi_forecast.svg",
        }
    }
}

/// One rendered chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    /// Complete SVG document
    pub svg: String,
}

/// Render all five charts in display order
#[instrument(skip_all)]
pub fn render_all(
    series: &AqiSeries,
    weather: &SyntheticWeather,
) -> Result<Vec<RenderedChart>, AirAwareError> {
    ChartKind::ALL
        .iter()
        .map(|&kind| {
            let svg = match kind {
                ChartKind::RiskScatter => risk_scatter::render(series),
                ChartKind::WeatherScatter => weather_scatter::render(series, weather),
                ChartKind::Categories => categories::render(series),
                ChartKind::Distribution => distribution::render(series),
                ChartKind::Forecast => forecast::render(series),
            }
            .map_err(|e| AirAwareError::chart(format!("{}: {e:#}", kind.title())))?;

            debug!("Rendered '{}' ({} bytes)", kind.title(), svg.len());
            Ok(RenderedChart { kind, svg })
        })
        .collect()
}

/// Draw onto a white [`CHART_SIZE`] SVG canvas and return the document
pub(crate) fn svg_chart<F>(draw: F) -> Result<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Tick label for a day offset relative to `today`
pub(crate) fn date_label(today: NaiveDate, offset: i32) -> String {
    today
        .checked_add_signed(Duration::days(i64::from(offset)))
        .map(|date| date.format("%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn risk_color(risk: HealthRisk) -> RGBColor {
    match risk {
        HealthRisk::Low => GREEN,
        HealthRisk::Moderate => YELLOW,
        HealthRisk::High => ORANGE,
        HealthRisk::VeryHigh => RED,
    }
}

pub(crate) fn category_color(category: AqiCategory) -> RGBColor {
    match category {
        AqiCategory::Good => GREEN,
        AqiCategory::Moderate => YELLOW,
        AqiCategory::Unhealthy => ORANGE,
        AqiCategory::Hazardous => RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{generate_series, synthetic_weather};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn flat_series(value: u32) -> AqiSeries {
        let mut series = generate_series(&mut StdRng::seed_from_u64(1), today());
        series.past = vec![value; 30];
        series.forecast = vec![value; 30];
        series
    }

    #[test]
    fn test_render_all_produces_five_titled_svgs() {
        let mut rng = StdRng::seed_from_u64(11);
        let series = generate_series(&mut rng, today());
        let weather = synthetic_weather(&mut rng);

        let charts = render_all(&series, &weather).unwrap();

        assert_eq!(charts.len(), 5);
        for (chart, kind) in charts.iter().zip(ChartKind::ALL) {
            assert_eq!(chart.kind, kind);
            assert!(chart.svg.starts_with("<svg"));
            assert!(chart.svg.contains(kind.title()));
            assert!(chart.svg.contains(r#"width="1000""#));
        }
    }

    #[test]
    fn test_fixed_seed_renders_identically() {
        let render = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = generate_series(&mut rng, today());
            let weather = synthetic_weather(&mut rng);
            render_all(&series, &weather).unwrap()
        };

        assert_eq!(render(99), render(99));
        assert_ne!(render(99), render(100));
    }

    #[test]
    fn test_identical_values_render() {
        let weather = synthetic_weather(&mut StdRng::seed_from_u64(5));
        for value in [20, 50, 120, 199] {
            let charts = render_all(&flat_series(value), &weather).unwrap();
            assert_eq!(charts.len(), 5);
        }
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(today(), 0), "03-15");
        assert_eq!(date_label(today(), -29), "02-15");
    }

    #[test]
    fn test_chart_file_names_are_unique() {
        let mut names: Vec<_> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }
}
