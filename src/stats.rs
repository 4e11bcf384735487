use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Running mean and sample standard deviation (Welford's algorithm).
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorReport {
    pub n_vals: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            n_vals: self.n_vals,
            mean: if self.n_vals > 0 { self.mean } else { f64::NAN },
            std_dev: if self.n_vals > 1 {
                (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
            } else {
                f64::NAN
            },
        }
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        iter.into_iter().for_each(|val| acc.add(val));
        acc
    }
}

/// Trailing mean over the last `size` values.
///
/// Keeps a running sum over a fixed-size sliding range, so each push costs
/// O(1). Until `size` values have been pushed the window is not full and
/// [`RollingMean::push`] yields `None`.
pub struct RollingMean {
    size: usize,
    vals: VecDeque<f64>,
    sum: f64,
}

impl RollingMean {
    /// `size` must be at least 1.
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 1);
        Self {
            size,
            vals: VecDeque::with_capacity(size),
            sum: 0.0,
        }
    }

    /// Add a value and return the mean of the current window, if full.
    pub fn push(&mut self, val: f64) -> Option<f64> {
        self.vals.push_back(val);
        self.sum += val;
        if self.vals.len() > self.size {
            if let Some(old) = self.vals.pop_front() {
                self.sum -= old;
            }
        }
        self.mean()
    }

    pub fn is_full(&self) -> bool {
        self.vals.len() == self.size
    }

    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.sum / self.size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accumulator_mean_and_std_dev() {
        let acc: Accumulator = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        let report = acc.report();
        assert_eq!(report.n_vals, 8);
        assert_relative_eq!(report.mean, 5.0);
        assert_relative_eq!(report.std_dev, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_accumulator_empty_is_nan() {
        let report = Accumulator::new().report();
        assert!(report.mean.is_nan());
        assert!(report.std_dev.is_nan());
    }

    #[test]
    fn test_rolling_mean_fills_then_slides() {
        let mut rolling = RollingMean::new(3);
        assert_eq!(rolling.push(1.0), None);
        assert_eq!(rolling.push(2.0), None);
        assert!(!rolling.is_full());
        assert_eq!(rolling.push(3.0), Some(2.0));
        assert!(rolling.is_full());
        assert_eq!(rolling.push(6.0), Some(11.0 / 3.0));
        assert_eq!(rolling.push(9.0), Some(6.0));
    }

    #[test]
    fn test_rolling_mean_size_one_is_identity() {
        let mut rolling = RollingMean::new(1);
        for val in [5.0, -1.0, 0.0, 12.5] {
            assert_eq!(rolling.push(val), Some(val));
        }
    }

    #[test]
    fn test_rolling_mean_matches_naive_mean() {
        let vals: Vec<f64> = (0..50).map(|i| ((i * 37) % 11) as f64 * 1.5).collect();
        let size = 7;
        let mut rolling = RollingMean::new(size);
        for (i, &val) in vals.iter().enumerate() {
            let got = rolling.push(val);
            if i + 1 < size {
                assert_eq!(got, None);
            } else {
                let window = &vals[i + 1 - size..=i];
                let naive = window.iter().sum::<f64>() / size as f64;
                assert_relative_eq!(got.unwrap(), naive, epsilon = 1e-9);
            }
        }
    }
}
