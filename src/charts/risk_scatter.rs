//! Past AQI by date, coloured by health risk

use anyhow::Result;
use plotters::prelude::*;

use super::{AQI_AXIS_MAX, CAPTION_FONT, ChartKind, date_label, risk_color, svg_chart};
use crate::risk::HealthRisk;
use crate::series::AqiSeries;

pub fn render(series: &AqiSeries) -> Result<String> {
    let today = series.today().unwrap_or_default();
    let days = series.dates.len() as i32;
    let offsets = series.day_offsets();

    svg_chart(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::RiskScatter.title(), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-days..1, 0u32..AQI_AXIS_MAX)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("AQI Level")
            .x_labels(10)
            .x_label_formatter(&|offset| date_label(today, *offset))
            .draw()?;

        // One series per level so each colour gets a legend entry
        for risk in HealthRisk::ALL {
            let color = risk_color(risk);
            chart
                .draw_series(
                    offsets
                        .iter()
                        .zip(&series.past)
                        .filter(|(_, aqi)| HealthRisk::classify(**aqi) == risk)
                        .map(|(&x, &y)| Circle::new((x, y), 6, color.filled())),
                )?
                .label(risk.label())
                .legend(move |(x, y)| Circle::new((x + 10, y), 6, color.filled()));
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
