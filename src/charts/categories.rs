//! Bar chart of past AQI per category

use anyhow::Result;
use plotters::prelude::*;

use super::{CAPTION_FONT, ChartKind, category_color, svg_chart};
use crate::risk::{AqiCategory, category_counts};
use crate::series::AqiSeries;

pub fn render(series: &AqiSeries) -> Result<String> {
    let counts = category_counts(&series.past);
    let y_max = counts.iter().copied().max().unwrap_or(0) as u32 + 1;

    svg_chart(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Categories.title(), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..4u32).into_segmented(), 0u32..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("AQI Category")
            .y_desc("Frequency")
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => AqiCategory::ALL
                    .get(*i as usize)
                    .map(|category| category.label().to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(AqiCategory::ALL.iter().zip(counts).map(|(&category, count)| {
            let i = category.index() as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), count as u32),
                ],
                category_color(category).filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))?;
        Ok(())
    })
}
