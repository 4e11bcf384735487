use crate::model::{Observation, SamplingEstimate};
use crate::period::EvaluationPeriod;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Rolling trend value at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub timestamp: NaiveDateTime,

    /// Mean of the window ending here, absent until the window has filled.
    pub value: Option<f64>,
}

/// Trailing rolling mean aligned with the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub window_size: usize,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trend value at position `i`.
    pub fn value(&self, i: usize) -> Option<f64> {
        self.points.get(i).and_then(|point| point.value)
    }

    pub fn n_present(&self) -> usize {
        self.points.iter().filter(|point| point.value.is_some()).count()
    }

    /// Last established trend value.
    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|point| point.value)
    }
}

/// Statistics for the selected evaluation period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub first: Observation,
    pub last: Observation,
    pub n_obs: usize,
    pub raw_mean: f64,
    pub std_dev: f64,
}

impl PeriodSummary {
    /// Whole days between the first and the last selected observation.
    pub fn n_days(&self) -> i64 {
        (self.last.timestamp - self.first.timestamp).num_days()
    }
}

/// Everything derived from one input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub first_observation: Observation,
    pub last_observation: Observation,
    pub n_observations: usize,
    pub sampling: SamplingEstimate,
    pub window_size: usize,
    pub evaluation_period: EvaluationPeriod,
    pub period_summary: PeriodSummary,
    pub corrected_mean: f64,
    pub trend_series: TrendSeries,
}

/// One row of the chart data: the trend and the constant yearly mean line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartRow {
    #[serde(rename = "recorded")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "RADON_7_day_moving_avg Bq/m3")]
    pub trend: Option<f64>,

    #[serde(rename = "radon_y_mean Bq/m3")]
    pub corrected_mean: f64,
}

impl Report {
    /// Chart series spanning the whole timeline.
    pub fn chart_rows(&self) -> impl Iterator<Item = ChartRow> + '_ {
        self.trend_series.points.iter().map(|point| ChartRow {
            timestamp: point.timestamp,
            trend: point.value,
            corrected_mean: self.corrected_mean,
        })
    }
}
