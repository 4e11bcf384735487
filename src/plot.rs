use crate::report::Report;
use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, TimeDelta};
use plotters::prelude::*;
use std::path::Path;

const IMAGE_SIZE: (u32, u32) = (1280, 720);
const SECS_PER_DAY: f64 = 86_400.0;

fn days_since(origin: NaiveDateTime, timestamp: NaiveDateTime) -> f64 {
    (timestamp - origin).num_seconds() as f64 / SECS_PER_DAY
}

fn date_label(origin: NaiveDateTime, days: f64) -> String {
    let date_time = origin + TimeDelta::seconds((days * SECS_PER_DAY).round() as i64);
    date_time.format("%Y-%m-%d").to_string()
}

/// Draw the rolling trend and the constant yearly mean line as a PNG.
///
/// The x axis holds days since the first observation, labelled with dates.
pub fn draw_chart<P: AsRef<Path>>(file: P, report: &Report, name: &str) -> Result<()> {
    let file = file.as_ref();
    let points = &report.trend_series.points;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        bail!("no observations to plot");
    };
    let origin = first.timestamp;
    let x_end = days_since(origin, last.timestamp);

    let trend: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|point| Some((days_since(origin, point.timestamp), point.value?)))
        .collect();

    let mean = report.corrected_mean;
    let (y_lo, y_hi) = trend
        .iter()
        .map(|&(_, val)| val)
        .fold((mean, mean), |(lo, hi), val| (lo.min(val), hi.max(val)));
    let pad = ((y_hi - y_lo) * 0.1).max(1.0);
    let y_range = y_lo.min(0.0)..y_hi + pad;

    let root = BitMapBackend::new(file, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).context("failed to fill background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Radon plot for: {name}"), ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_end, y_range)
        .context("failed to build chart")?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Radon (Bq/m3)")
        .x_label_formatter(&|days: &f64| date_label(origin, *days))
        .draw()
        .context("failed to draw mesh")?;

    chart
        .draw_series(LineSeries::new(trend, BLUE.stroke_width(2)))
        .context("failed to draw trend")?
        .label("RADON_7_day_moving_avg Bq/m3")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new([(0.0, mean), (x_end, mean)], RED.stroke_width(2)))
        .context("failed to draw yearly mean")?
        .label("radon_y_mean Bq/m3")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .context("failed to draw legend")?;

    root.present()
        .with_context(|| format!("failed to write {file:?}"))?;

    Ok(())
}
