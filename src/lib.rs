//! Rolling trend and corrected yearly mean of indoor radon measurements.
//!
//! The pipeline reads a semicolon-delimited sensor export ([`input`]),
//! orders it and estimates its cadence ([`normalize`]), then computes the
//! weekly rolling average and the yearly mean ([`engine`]) following the
//! Norwegian radon measurement guideline. Results are logged and exported
//! as chart data, a chart image ([`plot`]) and a JSON report ([`output`]).

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod manager;
pub mod model;
pub mod normalize;
pub mod output;
pub mod period;
pub mod plot;
pub mod report;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
