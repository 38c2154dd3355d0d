//! JSON object extraction.

use record_schema_core::{Record, Value};

use crate::error::{ExtractError, Result};

/// Extracts a record from a JSON object. The top level must be an
/// object; nested values keep their full structure.
pub(crate) fn extract_json(text: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Mapping(fields) => Ok(fields),
        other => Err(ExtractError::NotAnObject(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use record_schema_core::ValueKind;

    use super::*;

    #[test]
    fn test_extracts_nested_structure() {
        let record = extract_json(
            r#"{"source.ip": "10.0.0.1", "tags": ["a", "b"], "labels": {"env": "prod"}}"#,
        )
        .unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record["tags"].kind(), ValueKind::Sequence);
        assert_eq!(record["labels"].kind(), ValueKind::Mapping);
    }

    #[test]
    fn test_rejects_non_object_top_level() {
        let err = extract_json(r#"["not", "an", "object"]"#).unwrap_err();
        assert!(matches!(err, ExtractError::NotAnObject(ValueKind::Sequence)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = extract_json(r#"{"unterminated": "#).unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }
}
