//! Record extraction: raw log bytes into field → value mappings.
//!
//! This crate is the "extractor" collaborator of the validation core: it
//! turns one raw log record into a [`Record`] that
//! `record_schema_core::validate_record` can check. It either produces a
//! non-empty mapping or fails with an [`ExtractError`] — an empty result
//! is an extraction failure by contract, so the validator never sees one.
//!
//! Two encodings are supported, chosen by [`detect_format`] or forced by
//! the caller:
//!
//! - JSON objects (one object per record);
//! - `key=value` lines, with quoted or bare values and any amount of
//!   non-pair text between pairs.
//!
//! # Example
//!
//! ```
//! use record_schema_extract::extract_record;
//!
//! let record = extract_record(br#"src=10.0.0.1 dpt=443 allowed=true"#).unwrap();
//! assert_eq!(record.len(), 3);
//!
//! let record = extract_record(br#"{"src": "10.0.0.1", "dpt": 443}"#).unwrap();
//! assert_eq!(record.len(), 2);
//! ```
//!
//! This is a library-only crate; the `record-check` binary in
//! `record-schema-cli` wires it to files and a schema.

mod detect;
mod error;
mod json;
mod kv;

use record_schema_core::Record;
use tracing::debug;

pub use detect::{RecordFormat, detect_format};
pub use error::{ExtractError, Result};

/// Extracts a record from raw bytes, detecting the encoding.
///
/// # Errors
///
/// Fails on empty or non-UTF-8 input, on malformed JSON, on a JSON top
/// level that is not an object, and when no fields could be extracted.
pub fn extract_record(raw: &[u8]) -> Result<Record> {
    let text = record_text(raw)?;
    let format = detect_format(text);
    debug!(?format, "detected record format");
    extract_text(text, format)
}

/// Extracts a record from raw bytes using a caller-chosen encoding,
/// bypassing detection.
pub fn extract_record_as(raw: &[u8], format: RecordFormat) -> Result<Record> {
    extract_text(record_text(raw)?, format)
}

fn record_text(raw: &[u8]) -> Result<&str> {
    if raw.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Err(ExtractError::EmptyInput);
    }
    Ok(std::str::from_utf8(raw)?)
}

fn extract_text(text: &str, format: RecordFormat) -> Result<Record> {
    let record = match format {
        RecordFormat::Json => json::extract_json(text)?,
        RecordFormat::KeyValue => kv::extract_kv(text)?,
    };
    if record.is_empty() {
        return Err(ExtractError::EmptyRecord);
    }
    debug!(fields = record.len(), "extracted record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_an_extraction_failure() {
        assert!(matches!(extract_record(b""), Err(ExtractError::EmptyInput)));
        assert!(matches!(
            extract_record(b"  \n\t "),
            Err(ExtractError::EmptyInput)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_an_extraction_failure() {
        assert!(matches!(
            extract_record(&[0x66, 0x6f, 0xff, 0xfe]),
            Err(ExtractError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_empty_json_object_is_an_empty_record() {
        assert!(matches!(
            extract_record(b"{}"),
            Err(ExtractError::EmptyRecord)
        ));
    }

    #[test]
    fn test_line_without_pairs_is_an_empty_record() {
        assert!(matches!(
            extract_record(b"kernel panic imminent"),
            Err(ExtractError::EmptyRecord)
        ));
    }

    #[test]
    fn test_format_override_skips_detection() {
        // Forced key=value extraction of a JSON-looking line finds no
        // pairs instead of parsing the object.
        let result = extract_record_as(br#"{"a": 1}"#, RecordFormat::KeyValue);
        assert!(matches!(result, Err(ExtractError::EmptyRecord)));
    }

    #[test]
    fn test_json_and_kv_agree_on_equivalent_input() {
        let from_json = extract_record(br#"{"src": "10.0.0.1", "dpt": 443, "ok": true}"#).unwrap();
        let from_kv = extract_record(b"src=10.0.0.1 dpt=443 ok=true").unwrap();
        assert_eq!(from_json, from_kv);
    }
}
