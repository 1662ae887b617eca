//! Simulated temperature, humidity and wind speed against past AQI

use anyhow::Result;
use plotters::prelude::*;

use super::{AQI_AXIS_MAX, BLUE, CAPTION_FONT, ChartKind, GREEN, RED, svg_chart};
use crate::series::{AqiSeries, SyntheticWeather};

pub fn render(series: &AqiSeries, weather: &SyntheticWeather) -> Result<String> {
    let layers = [
        ("Temperature vs AQI", &weather.temperatures, BLUE),
        ("Humidity vs AQI", &weather.humidity, GREEN),
        ("Wind Speed vs AQI", &weather.wind_speed, RED),
    ];

    svg_chart(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::WeatherScatter.title(), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0u32..100u32, 0u32..AQI_AXIS_MAX)?;

        chart
            .configure_mesh()
            .x_desc("Weather Parameter")
            .y_desc("AQI Level")
            .draw()?;

        for (label, values, color) in layers {
            chart
                .draw_series(
                    values
                        .iter()
                        .zip(&series.past)
                        .map(|(&x, &y)| Circle::new((x, y), 5, color.filled())),
                )?
                .label(label)
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}
