use thiserror::Error;

/// Failures surfaced by the session operations.
///
/// Metadata key and column lookups are explicit, catchable kinds rather than
/// panics. Invalid console input never appears here: the prompt loops absorb
/// it and re-prompt. `InputClosed` is the end condition for a finite input
/// source (scripted input ran dry, or the user hit EOF at the console).
#[derive(Debug, Error)]
pub enum Error {
    #[error("metadata key '{key}' not found")]
    KeyMissing { key: String },

    #[error("column '{column}' not found in the data labels")]
    ColumnNotFound { column: String },

    #[error("timestamp value '{value}' is not of the form 'DATE TIME'")]
    MalformedTimestamp { value: String },

    #[error("input closed before a value was read")]
    InputClosed,

    #[error("metadata table is malformed: {reason}")]
    MalformedMetadata { reason: String },

    #[error("console error: {0}")]
    Console(String),

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
