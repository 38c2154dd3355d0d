//! Record encoding detection.

/// Supported record encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A single JSON object.
    Json,
    /// A line of `key=value` pairs.
    KeyValue,
}

/// Detects the encoding of a record from its leading content.
///
/// Records whose first non-whitespace character is `{` are treated as
/// JSON objects; everything else goes through the `key=value` scanner.
///
/// # Examples
///
/// ```
/// use record_schema_extract::{RecordFormat, detect_format};
///
/// assert_eq!(detect_format(r#"{"a": 1}"#), RecordFormat::Json);
/// assert_eq!(detect_format("src=10.0.0.1 dst=10.0.0.2"), RecordFormat::KeyValue);
/// ```
pub fn detect_format(text: &str) -> RecordFormat {
    if text.trim_start().starts_with('{') {
        RecordFormat::Json
    } else {
        RecordFormat::KeyValue
    }
}
