use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by the CSV loader.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Convenience result type for pipeline operations.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type returned by the cleaning pipeline.
///
/// Only malformed input is fatal; unparseable values and degenerate columns are handled inside
/// the stages.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// A row does not have one value per schema field.
    #[error("row {row} has {found} values, schema has {expected} fields")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value's type does not match the declared type of its column.
    #[error("value at row {row} column '{column}' is {found}, expected {expected}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: DataType,
        found: DataType,
    },

    /// Two schema fields share the same name.
    #[error("duplicate column name '{column}'")]
    DuplicateColumn { column: String },

    /// The cleaning report could not be rendered.
    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}
