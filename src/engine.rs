use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Series;
use crate::normalize::Normalized;
use crate::period::select_period;
use crate::report::{PeriodSummary, Report, TrendPoint, TrendSeries};
use crate::stats::{Accumulator, RollingMean};

const SECS_PER_DAY: f64 = 86_400.0;

/// Number of samples covering `window_days` at the given sampling interval.
///
/// Rounded to the nearest integer and never less than 1.
///
/// # Errors
/// [`Error::Aggregation`] if the interval is not a positive finite number.
pub fn window_size(window_days: u32, interval_secs: f64) -> Result<usize> {
    if !(interval_secs.is_finite() && interval_secs > 0.0) {
        return Err(Error::aggregation(format!(
            "sampling interval must be positive, but is {interval_secs} s"
        )));
    }
    let n_samples = (f64::from(window_days) * SECS_PER_DAY / interval_secs).round();
    if !n_samples.is_finite() {
        return Err(Error::aggregation(format!(
            "window of {window_days} days is not representable at {interval_secs} s"
        )));
    }
    Ok((n_samples as usize).max(1))
}

/// Trailing rolling mean of the radon values in `series`.
pub fn rolling_trend(series: &Series, window_size: usize) -> Result<TrendSeries> {
    if window_size == 0 {
        return Err(Error::aggregation("window size must be at least 1"));
    }
    let mut rolling = RollingMean::new(window_size);
    let points = series
        .observations()
        .iter()
        .map(|obs| TrendPoint {
            timestamp: obs.timestamp,
            value: rolling.push(obs.radon_value),
        })
        .collect();
    Ok(TrendSeries {
        window_size,
        points,
    })
}

/// Build the full [`Report`] for a normalized series.
///
/// # Errors
/// Fails without a partial report if the window size is degenerate or if no
/// evaluation period can be selected.
pub fn aggregate(normalized: &Normalized, cfg: &Config) -> Result<Report> {
    let Normalized { series, sampling } = normalized;

    let window_size = window_size(cfg.trend_window_days, sampling.interval_secs)?;
    log::debug!("trend window of {window_size} samples");
    let trend_series = rolling_trend(series, window_size)?;

    let evaluation_period = select_period(series, cfg)?;
    let selected = &series.observations()[evaluation_period.range.clone()];
    let (Some(&first), Some(&last)) = (selected.first(), selected.last()) else {
        return Err(Error::aggregation("evaluation period holds no observations"));
    };
    let acc: Accumulator = selected.iter().map(|obs| obs.radon_value).collect();
    let stats = acc.report();

    let corrected_mean = stats.mean * evaluation_period.correction_factor;

    Ok(Report {
        first_observation: series.first(),
        last_observation: series.last(),
        n_observations: series.len(),
        sampling: *sampling,
        window_size,
        period_summary: PeriodSummary {
            first,
            last,
            n_obs: stats.n_vals,
            raw_mean: stats.mean,
            std_dev: stats.std_dev,
        },
        evaluation_period,
        corrected_mean,
        trend_series,
    })
}
