use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Series;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;
use std::ops::Range;

/// Month and day on which a heating season starts (inclusive).
const SEASON_START: (u32, u32) = (11, 1);
/// Month and day on which a heating season ends (exclusive), in the next year.
const SEASON_END: (u32, u32) = (4, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodKind {
    /// Trailing year ending at the last observation.
    FullYear,
    /// November 1 of `start_year` to April 1 of the following year.
    HeatingSeason { start_year: i32 },
}

/// Contiguous sub-range of a [`Series`] used for the yearly mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationPeriod {
    #[serde(flatten)]
    pub kind: PeriodKind,

    /// Lower bound of the period (inclusive).
    pub start: NaiveDateTime,
    /// Upper bound of the period. Inclusive for a full year, exclusive for a
    /// heating season.
    pub end: NaiveDateTime,

    /// Indices of the selected observations.
    #[serde(skip)]
    pub range: Range<usize>,

    pub correction_factor: f64,
}

impl EvaluationPeriod {
    pub fn n_obs(&self) -> usize {
        self.range.len()
    }

    pub fn is_full_year(&self) -> bool {
        self.kind == PeriodKind::FullYear
    }
}

/// Pick the evaluation period for `series`.
///
/// A series spanning at least a full year uses its trailing year uncorrected.
/// Anything shorter falls back to the heating season holding the most
/// observations, scaled by the winter correction factor.
///
/// # Errors
/// [`Error::InsufficientData`] if no heating season holds data, or if the
/// selected observations cover fewer than `min_winter_months` months.
pub fn select_period(series: &Series, cfg: &Config) -> Result<EvaluationPeriod> {
    let full_year = TimeDelta::days(i64::from(cfg.full_year_days));
    if series.span() >= full_year {
        let end = series.last().timestamp;
        let start = end - full_year;
        let range = series.lower_bound(start)..series.len();
        log::debug!("full year period from {start} with {} observations", range.len());
        return Ok(EvaluationPeriod {
            kind: PeriodKind::FullYear,
            start,
            end,
            range,
            correction_factor: 1.0,
        });
    }

    let (start_year, range) = busiest_season(series)?.ok_or_else(|| {
        Error::insufficient_data(format!(
            "less than {} days of data and no observation between November 1 and April 1",
            cfg.full_year_days
        ))
    })?;
    let (start, end) = season_bounds(start_year)?;

    let obs_vec = series.observations();
    let first = obs_vec[range.start].timestamp;
    let last = obs_vec[range.end - 1].timestamp;
    let required = first
        .checked_add_months(Months::new(cfg.min_winter_months))
        .ok_or_else(|| Error::aggregation(format!("date overflow after {first}")))?;
    if last < required {
        return Err(Error::insufficient_data(format!(
            "heating season {start_year}-{} covers {first} to {last}, less than {} months",
            start_year + 1,
            cfg.min_winter_months
        )));
    }
    log::debug!(
        "heating season {start_year} with {} observations",
        range.len()
    );

    Ok(EvaluationPeriod {
        kind: PeriodKind::HeatingSeason { start_year },
        start,
        end,
        range,
        correction_factor: cfg.winter_correction_factor,
    })
}

/// Heating season overlapping `series` with the most observations.
///
/// Ties go to the later season. Returns `None` if no observation falls in
/// any season.
fn busiest_season(series: &Series) -> Result<Option<(i32, Range<usize>)>> {
    let first_year = series.first().timestamp.year() - 1;
    let last_year = series.last().timestamp.year();

    let mut best: Option<(i32, Range<usize>)> = None;
    for start_year in first_year..=last_year {
        let (start, end) = season_bounds(start_year)?;
        let range = series.lower_bound(start)..series.lower_bound(end);
        if range.is_empty() {
            continue;
        }
        if best.as_ref().is_none_or(|(_, b)| range.len() >= b.len()) {
            best = Some((start_year, range));
        }
    }
    Ok(best)
}

fn season_bounds(start_year: i32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start = civil_date(start_year, SEASON_START)?;
    let end = civil_date(start_year + 1, SEASON_END)?;
    Ok((start, end))
}

fn civil_date(year: i32, (month, day): (u32, u32)) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| Error::aggregation(format!("no such date {year}-{month:02}-{day:02}")))
}
