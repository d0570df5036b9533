use thiserror::Error;

/// Everything that can stop a report run.
///
/// Schema and domain problems reject the whole input: a partial aggregate
/// over the rows that happened to parse would look plausible and be wrong.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("row {row}: required field `{field}` is missing")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: field `{field}` has invalid value {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: booking status {value:?} is neither confirmed nor canceled")]
    UnknownStatus { row: usize, value: String },

    #[error("row {row}: malformed CSV record: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
