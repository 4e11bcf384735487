use crate::config::Config;
use crate::engine::aggregate;
use crate::input::read_rows;
use crate::normalize::normalize;
use crate::output::{
    chart_file, image_file, log_report, report_file, write_chart_data, write_report_json,
};
use crate::plot::draw_chart;
use crate::report::Report;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Runs the report pipeline for a single input file.
pub struct Manager {
    input_file: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(input_file: P, cfg: Config) -> Self {
        let input_file = input_file.as_ref().to_path_buf();
        Self { input_file, cfg }
    }

    /// Read, normalize and aggregate the input file.
    pub fn build_report(&self) -> Result<Report> {
        let rows = read_rows(&self.input_file).context("failed to read input rows")?;

        let normalized =
            normalize(&rows, self.cfg.interval_divisor).context("failed to normalize series")?;

        let report = aggregate(&normalized, &self.cfg).context("failed to aggregate series")?;

        Ok(report)
    }

    /// Build the report, log it and export it next to the input file.
    pub fn run_report(&self) -> Result<Report> {
        let report = self.build_report()?;

        let name = self
            .input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        log_report(&report, &name);

        let chart_file = chart_file(&self.input_file);
        write_chart_data(&chart_file, &report).context("failed to save chart data")?;
        log::info!("saved chart data to {chart_file:?}");

        let image_file = image_file(&self.input_file);
        draw_chart(&image_file, &report, &name).context("failed to save chart image")?;
        log::info!("saved chart image to {image_file:?}");

        let report_file = report_file(&self.input_file);
        write_report_json(&report_file, &report).context("failed to save report")?;
        log::info!("saved report to {report_file:?}");

        Ok(report)
    }
}
