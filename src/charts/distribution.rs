//! Density-normalised histogram of past AQI

use anyhow::Result;
use plotters::prelude::*;

use super::{BLUE, CAPTION_FONT, ChartKind, svg_chart};
use crate::series::AqiSeries;

/// Number of histogram bins
pub const BINS: usize = 10;

/// One histogram bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityBin {
    pub start: f64,
    pub end: f64,
    pub density: f64,
}

/// Bin `values` into `bins` equal-width bins over their range.
///
/// Densities integrate to 1. The last bin is closed on the right, and a range
/// of zero width is widened to ±0.5 around the single value.
#[must_use]
pub fn density_histogram(values: &[u32], bins: usize) -> Vec<DensityBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut low = f64::from(values.iter().copied().min().unwrap_or(0));
    let mut high = f64::from(values.iter().copied().max().unwrap_or(0));
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in values {
        let index = ((f64::from(value) - low) / width).floor() as usize;
        counts[index.min(bins - 1)] += 1;
    }

    let total = values.len() as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DensityBin {
            start: low + width * i as f64,
            end: low + width * (i + 1) as f64,
            density: count as f64 / (total * width),
        })
        .collect()
}

pub fn render(series: &AqiSeries) -> Result<String> {
    let bins = density_histogram(&series.past, BINS);
    let x_range = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.start..last.end,
        _ => 0.0..1.0,
    };
    let peak = bins.iter().map(|bin| bin.density).fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };
    let fill = BLUE.mix(0.6);

    svg_chart(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Distribution.title(), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("AQI Level")
            .y_desc("Density")
            .y_label_formatter(&|v| format!("{v:.3}"))
            .draw()?;

        chart
            .draw_series(bins.iter().map(|bin| {
                Rectangle::new([(bin.start, 0.0), (bin.end, bin.density)], fill.filled())
            }))?
            .label("AQI Distribution")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}
