//! Forecast line with a fixed-width band

use anyhow::Result;
use plotters::prelude::*;

use super::{AQI_AXIS_MAX, BLUE, CAPTION_FONT, ChartKind, LIGHT_BLUE, date_label, svg_chart};
use crate::series::AqiSeries;

/// Half-width of the shaded band, in AQI units
pub const BAND: f64 = 10.0;

pub fn render(series: &AqiSeries) -> Result<String> {
    let today = series.today().unwrap_or_default();
    let days = series.dates.len() as i32;
    let points: Vec<(i32, f64)> = series
        .day_offsets()
        .into_iter()
        .zip(series.forecast.iter().map(|&v| f64::from(v)))
        .collect();

    let band: Vec<(i32, f64)> = points
        .iter()
        .map(|&(x, y)| (x, y + BAND))
        .chain(points.iter().rev().map(|&(x, y)| (x, y - BAND)))
        .collect();
    let band_fill = LIGHT_BLUE.mix(0.3);

    svg_chart(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Forecast.title(), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-days..1, 0.0..f64::from(AQI_AXIS_MAX))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("AQI Level")
            .x_labels(10)
            .x_label_formatter(&|offset| date_label(today, *offset))
            .draw()?;

        chart
            .draw_series(std::iter::once(Polygon::new(band, band_fill.filled())))?
            .label("Confidence Interval")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], band_fill.filled())
            });

        chart
            .draw_series(LineSeries::new(points, BLUE.stroke_width(2)))?
            .label("Forecasted AQI")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}
