use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the report pipeline can signal.
///
/// None of them is recoverable: the computation is deterministic, so the
/// caller reports the kind and terminates.
#[derive(Error, Debug)]
pub enum Error {
    /// No input file was given on the command line.
    #[error("usage error: {0}")]
    Usage(String),

    /// Input is unreadable, malformed or misses a required column.
    #[error("parse error: {0}")]
    Parse(String),

    /// Too few observations, or a heating season sample that is too short.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Invariant violated while computing the trend or the period.
    #[error("aggregation error: {0}")]
    Aggregation(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    pub fn aggregation(msg: impl Into<String>) -> Self {
        Error::Aggregation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 2,
            Error::Parse(_) | Error::Io(_) | Error::Csv(_) => 3,
            Error::InsufficientData(_) => 4,
            Error::Aggregation(_) => 5,
            Error::Config(_) => 6,
        }
    }
}
