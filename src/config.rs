use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV_VAR: &str = "RADON_REPORT_CONFIG";

/// How the sampling interval is derived from the total span.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalDivisor {
    /// Divide by the number of gaps between samples (`len - 1`).
    #[default]
    Gaps,
    /// Divide by the number of samples (`len`).
    Samples,
}

/// Report configuration parameters.
///
/// Every field has a default matching the Norwegian radon guideline, so an
/// empty file (or no file at all) yields a usable configuration.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Length of the rolling trend window in days.
    pub trend_window_days: u32,

    /// Minimum span in days for the full-year evaluation period.
    pub full_year_days: u32,

    /// Correction factor applied to a heating season mean.
    pub winter_correction_factor: f64,
    /// Minimum number of calendar months a heating season sample must cover.
    pub min_winter_months: u32,

    /// Divisor used when estimating the sampling interval.
    pub interval_divisor: IntervalDivisor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trend_window_days: 7,
            full_year_days: 365,
            winter_correction_factor: 0.75,
            min_winter_months: 2,
            interval_divisor: IntervalDivisor::Gaps,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Missing keys take their default value. Performs validation on all
    /// parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file)
            .map_err(|err| Error::config(format!("failed to read {file:?}: {err}")))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|err| Error::config(format!("failed to deserialize config: {err}")))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the configuration named by [`CONFIG_ENV_VAR`], or the default one.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(file) => Self::from_file(file),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        check_num(self.trend_window_days, 1..=366, "invalid trend window")?;
        check_num(self.full_year_days, 1..=3660, "invalid full year length")?;
        if !(self.winter_correction_factor > 0.0 && self.winter_correction_factor <= 1.0) {
            return Err(Error::config(format!(
                "invalid winter correction factor: must be in (0, 1], but is {}",
                self.winter_correction_factor
            )));
        }
        check_num(self.min_winter_months, 1..=5, "invalid minimum winter months")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R, what: &str) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        return Err(Error::config(format!(
            "{what}: number must be in the range {range:?}, but is {num:?}"
        )));
    }
    Ok(())
}
