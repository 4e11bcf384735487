use crate::config::IntervalDivisor;
use crate::error::{Error, Result};
use crate::input::RawRow;
use crate::model::{Observation, SamplingEstimate, Series};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Ordered series together with its inferred sampling cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub series: Series,
    pub sampling: SamplingEstimate,
}

/// Turn raw rows into a chronologically ordered [`Series`].
///
/// Rows may arrive in any order; they are sorted by timestamp, which must be
/// unique across rows.
///
/// # Errors
/// - [`Error::Parse`] if any timestamp cannot be interpreted or appears on
///   more than one row. No row is ever dropped.
/// - [`Error::InsufficientData`] if fewer than two rows are given.
pub fn normalize(rows: &[RawRow], divisor: IntervalDivisor) -> Result<Normalized> {
    let mut indexed = rows
        .iter()
        .enumerate()
        .map(|(i_row, row)| {
            let timestamp = parse_timestamp(&row.recorded).ok_or_else(|| {
                Error::parse(format!(
                    "row {}: unparseable timestamp {:?}",
                    i_row + 1,
                    row.recorded
                ))
            })?;
            Ok((i_row, Observation::new(timestamp, row.radon_value)))
        })
        .collect::<Result<Vec<_>>>()?;

    let n_obs = indexed.len();
    if n_obs < 2 {
        return Err(Error::insufficient_data(format!(
            "at least 2 observations are needed to estimate the sampling interval, but got {n_obs}"
        )));
    }

    indexed.sort_by_key(|(_, obs)| obs.timestamp);
    if let Some(pair) = indexed
        .windows(2)
        .find(|pair| pair[0].1.timestamp == pair[1].1.timestamp)
    {
        let (i_a, i_b) = (pair[0].0.min(pair[1].0), pair[0].0.max(pair[1].0));
        return Err(Error::parse(format!(
            "row {}: duplicate timestamp {}, already on row {}",
            i_b + 1,
            pair[1].1.timestamp,
            i_a + 1
        )));
    }
    let series = Series::from_sorted(indexed.into_iter().map(|(_, obs)| obs).collect());

    let total_span = series.span();
    let n_div = match divisor {
        IntervalDivisor::Gaps => n_obs - 1,
        IntervalDivisor::Samples => n_obs,
    };
    let interval_secs = total_span.num_milliseconds() as f64 / 1000.0 / n_div as f64;
    log::debug!("{n_obs} observations over {total_span}, interval {interval_secs:.3} s");

    Ok(Normalized {
        series,
        sampling: SamplingEstimate {
            total_span,
            interval_secs,
        },
    })
}

/// Interpret a timestamp as a civil date and time.
///
/// Timestamps with an explicit offset keep the wall-clock time they name.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.naive_local());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, format) {
            return Some(date_time);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
