use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A single radon reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Civil date and time of the reading.
    pub timestamp: NaiveDateTime,

    /// Short term radon concentration in Bq/m³.
    pub radon_value: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, radon_value: f64) -> Self {
        Self {
            timestamp,
            radon_value,
        }
    }
}

/// Non-empty sequence of observations with strictly increasing timestamps.
///
/// Only [`crate::normalize::normalize`] builds a `Series`, so the ordering
/// holds for every value of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    obs_vec: Vec<Observation>,
}

impl Series {
    pub(crate) fn from_sorted(obs_vec: Vec<Observation>) -> Self {
        debug_assert!(!obs_vec.is_empty());
        debug_assert!(obs_vec.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self { obs_vec }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.obs_vec
    }

    pub fn len(&self) -> usize {
        self.obs_vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obs_vec.is_empty()
    }

    pub fn first(&self) -> Observation {
        self.obs_vec[0]
    }

    pub fn last(&self) -> Observation {
        self.obs_vec[self.obs_vec.len() - 1]
    }

    /// Time between the first and the last observation.
    pub fn span(&self) -> TimeDelta {
        self.last().timestamp - self.first().timestamp
    }

    /// Index of the first observation not earlier than `timestamp`.
    pub fn lower_bound(&self, timestamp: NaiveDateTime) -> usize {
        self.obs_vec.partition_point(|obs| obs.timestamp < timestamp)
    }
}

/// Sampling cadence inferred from the series timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingEstimate {
    /// Time between the first and the last observation.
    #[serde(serialize_with = "serialize_seconds")]
    pub total_span: TimeDelta,

    /// Estimated time between consecutive observations, in seconds.
    pub interval_secs: f64,
}

fn serialize_seconds<S: serde::Serializer>(span: &TimeDelta, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_i64(span.num_seconds())
}
