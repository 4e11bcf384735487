use crate::error::{Error, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

/// Header of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "recorded";
/// Header of the short term radon average column.
pub const RADON_COLUMN: &str = "RADON_SHORT_TERM_AVG Bq/m3";

/// A single row of the export, before its timestamp is interpreted.
///
/// Columns other than the two named ones are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRow {
    pub recorded: String,

    #[serde(rename = "RADON_SHORT_TERM_AVG Bq/m3")]
    pub radon_value: f64,
}

impl RawRow {
    pub fn new(recorded: impl Into<String>, radon_value: f64) -> Self {
        Self {
            recorded: recorded.into(),
            radon_value,
        }
    }
}

/// Read every row of the export at `file`.
///
/// # Errors
/// Returns [`Error::Parse`] naming the file if it cannot be opened, lacks a
/// required column, or holds a row that cannot be decoded.
pub fn read_rows<P: AsRef<Path>>(file: P) -> Result<Vec<RawRow>> {
    let file = file.as_ref();
    let reader = File::open(file).map_err(|err| Error::parse(format!("{file:?}: {err}")))?;
    read_rows_from(reader).map_err(|err| match err {
        Error::Parse(msg) => Error::parse(format!("{file:?}: {msg}")),
        Error::Csv(err) => Error::parse(format!("{file:?}: {err}")),
        other => other,
    })
}

/// Read every row of a semicolon-delimited export from `reader`.
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in [TIMESTAMP_COLUMN, RADON_COLUMN] {
        if !headers.iter().any(|header| header == column) {
            return Err(Error::parse(format!("missing required column {column:?}")));
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: RawRow = record?;
        rows.push(row);
    }
    log::debug!("read {} rows", rows.len());

    Ok(rows)
}
