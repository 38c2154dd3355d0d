//! Error types for record extraction.

use record_schema_core::ValueKind;
use thiserror::Error;

/// Errors that can occur while extracting a record from raw log bytes.
///
/// Extraction either produces a non-empty field mapping or fails with one
/// of these; an empty result is an upstream failure, never a validation
/// concern.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input is empty or whitespace-only.
    #[error("record input is empty")]
    EmptyInput,

    /// The input is not valid UTF-8.
    #[error("record input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The input looked like JSON but failed to parse.
    #[error("parsing JSON record: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed as JSON but the top level is not an object.
    #[error("JSON record must be an object, got {0}")]
    NotAnObject(ValueKind),

    /// Extraction succeeded syntactically but produced no fields.
    #[error("no fields could be extracted from the record")]
    EmptyRecord,
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
