use crate::period::PeriodKind;
use crate::report::Report;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Log a human-readable summary of `report`.
pub fn log_report(report: &Report, name: &str) {
    log::info!("radon report for {name}");
    log::info!(
        "first observation: {} {:.1} Bq/m3",
        report.first_observation.timestamp,
        report.first_observation.radon_value
    );
    log::info!(
        "last observation: {} {:.1} Bq/m3",
        report.last_observation.timestamp,
        report.last_observation.radon_value
    );
    log::info!(
        "{} observations spanning {} days, interval {:.3} s",
        report.n_observations,
        report.sampling.total_span.num_days(),
        report.sampling.interval_secs
    );
    log::info!(
        "rolling trend window of {} observations",
        report.window_size
    );
    if let Some(latest) = report.trend_series.latest() {
        log::info!("latest rolling average: {latest:.1} Bq/m3");
    }

    let period = &report.evaluation_period;
    match period.kind {
        PeriodKind::FullYear => log::info!("full year selected, starting {}", period.start),
        PeriodKind::HeatingSeason { start_year } => log::info!(
            "heating season {start_year}-{} (November 1 to April 1) selected",
            start_year + 1
        ),
    }
    let summary = &report.period_summary;
    log::info!(
        "selected {} observations from {} to {} ({} days)",
        summary.n_obs,
        summary.first.timestamp,
        summary.last.timestamp,
        summary.n_days()
    );
    log::info!(
        "radon mean: {:.3} Bq/m3, standard deviation {:.3} Bq/m3",
        summary.raw_mean,
        summary.std_dev
    );
    if !period.is_full_year() {
        log::info!("yearly mean correction factor: {:.3}", period.correction_factor);
    }
    log::info!("yearly mean: {:.3} Bq/m3", report.corrected_mean);
}

/// Path next to `input` with its extension replaced by `suffix`.
fn sibling_file(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}"))
}

/// Where the chart data for `input` is written.
pub fn chart_file(input: &Path) -> PathBuf {
    sibling_file(input, " - Radon-rapport plot.csv")
}

/// Where the chart image for `input` is written.
pub fn image_file(input: &Path) -> PathBuf {
    sibling_file(input, " - Radon-rapport plot.png")
}

/// Where the JSON report for `input` is written.
pub fn report_file(input: &Path) -> PathBuf {
    sibling_file(input, " - Radon-rapport.json")
}

/// Write the trend and the yearly mean line as semicolon-delimited CSV.
pub fn write_chart_data<P: AsRef<Path>>(file: P, report: &Report) -> Result<()> {
    let file = file.as_ref();
    let writer = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(writer);

    for row in report.chart_rows() {
        writer.serialize(row).context("failed to serialize chart row")?;
    }
    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}

/// Write the whole report as pretty-printed JSON.
pub fn write_report_json<P: AsRef<Path>>(file: P, report: &Report) -> Result<()> {
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).context("failed to serialize report")?;
    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}
