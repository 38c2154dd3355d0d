//! Record validation against a loaded schema.
//!
//! Walks every field of a record, resolves its declared type expression,
//! and checks the value's shape against it. All discrepancies are
//! collected; validation itself never fails.
//!
//! # Examples
//!
//! ```
//! use record_schema_core::{Record, Schema, validate_record};
//!
//! let schema: Schema = r#"
//! fields:
//!   source.ip:
//!     type: ip
//!   event.count:
//!     type: ui64
//! "#
//! .parse()
//! .unwrap();
//!
//! let record: Record =
//!     serde_json::from_str(r#"{"source.ip": "10.0.0.1", "event.count": 7}"#).unwrap();
//! assert!(validate_record(&record, &schema).is_empty());
//!
//! let record: Record = serde_json::from_str(r#"{"source.ip": 10}"#).unwrap();
//! let discrepancies = validate_record(&record, &schema);
//! assert_eq!(
//!     discrepancies[0].to_string(),
//!     r#"field "source.ip": expected string for type "ip", got number"#,
//! );
//! ```

use thiserror::Error;

use crate::{ElementType, FieldType, Record, ScalarShape, ScalarType, Schema, TypeExpr, Value, ValueKind};

/// One reported non-conformance between a record and a schema.
///
/// Each variant renders as a single-line, self-contained message carrying
/// the field path (index-qualified for array elements), the expected
/// kind, and the actual kind. Callers display these messages; they are
/// not meant to be parsed back.
///
/// Discrepancies are data, not failures: a record yields zero or more of
/// them and validation always runs to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Discrepancy {
    /// The record contains a field the schema does not declare.
    #[error("unknown field {field:?}: not defined in schema")]
    UnknownField {
        /// The undeclared field name.
        field: String,
    },

    /// A string-like field holds a non-string value.
    #[error("field {field:?}: expected string for type {declared:?}, got {actual}")]
    ExpectedString {
        /// Field path, index-qualified for array elements.
        field: String,
        /// The declared type expression.
        declared: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// A boolean field holds a non-boolean value.
    #[error("field {field:?}: expected bool, got {actual}")]
    ExpectedBool {
        /// Field path, index-qualified for array elements.
        field: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// A numeric field holds a non-numeric value.
    #[error("field {field:?}: expected numeric for type {declared:?}, got {actual}")]
    ExpectedNumeric {
        /// Field path, index-qualified for array elements.
        field: String,
        /// The declared type expression.
        declared: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// An array-typed field holds a non-sequence value.
    #[error("field {field:?}: expected array for type {declared:?}, got {actual}")]
    ExpectedArray {
        /// The field name.
        field: String,
        /// The declared type expression.
        declared: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// A map-typed field holds a non-mapping value.
    #[error("field {field:?}: expected map for type {declared:?}, got {actual}")]
    ExpectedMap {
        /// The field name.
        field: String,
        /// The declared type expression.
        declared: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// A tuple-typed field holds a non-sequence value.
    #[error("field {field:?}: expected array/tuple for type {declared:?}, got {actual}")]
    ExpectedTuple {
        /// The field name.
        field: String,
        /// The declared type expression.
        declared: String,
        /// The kind actually found.
        actual: ValueKind,
    },

    /// The schema declares a type expression outside the grammar.
    #[error("field {field:?}: unsupported schema type {declared:?}")]
    UnsupportedType {
        /// Field path, index-qualified for array elements.
        field: String,
        /// The declared expression, verbatim.
        declared: String,
    },
}

/// Validates a record against a schema, returning every discrepancy.
///
/// Fields are checked independently, in record (field-name) order, with
/// no short-circuit across fields: one field's failure never prevents
/// the others from being checked. An empty result means full
/// conformance. Within a single array-typed field, only the first
/// failing element is reported.
///
/// Unknown fields are reported without any type check; unsupported type
/// expressions are reported against their field here rather than at
/// schema load time.
///
/// # Examples
///
/// ```
/// use record_schema_core::{Discrepancy, Record, Schema, validate_record};
///
/// let schema: Schema = "fields:\n  known:\n    type: str\n".parse().unwrap();
/// let record: Record = serde_json::from_str(r#"{"surprise": 1}"#).unwrap();
///
/// let discrepancies = validate_record(&record, &schema);
/// assert_eq!(
///     discrepancies,
///     vec![Discrepancy::UnknownField {
///         field: "surprise".to_string(),
///     }],
/// );
/// ```
pub fn validate_record(record: &Record, schema: &Schema) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    for (field, value) in record {
        match schema.get(field) {
            None => discrepancies.push(Discrepancy::UnknownField {
                field: field.clone(),
            }),
            Some(declared) => {
                if let Some(discrepancy) = check_field(field, value, declared) {
                    discrepancies.push(discrepancy);
                }
            }
        }
    }

    discrepancies
}

/// Checks one field's value against its declared type. At most one
/// discrepancy per field.
fn check_field(field: &str, value: &Value, declared: &FieldType) -> Option<Discrepancy> {
    match declared.expr() {
        TypeExpr::Any => None,

        TypeExpr::Scalar(scalar) => check_scalar(field, value, *scalar, declared.declared()),

        TypeExpr::Array(elem) => {
            let Some(items) = value.as_sequence() else {
                return Some(Discrepancy::ExpectedArray {
                    field: field.to_string(),
                    declared: declared.declared().to_string(),
                    actual: value.kind(),
                });
            };
            // First failing element only; later elements of the same
            // field are not reported.
            for (index, item) in items.iter().enumerate() {
                let path = format!("{field}[{index}]");
                let discrepancy = match elem {
                    ElementType::Scalar(scalar) => {
                        check_scalar(&path, item, *scalar, scalar.as_str())
                    }
                    ElementType::Unsupported(tag) => Some(Discrepancy::UnsupportedType {
                        field: path,
                        declared: tag.clone(),
                    }),
                };
                if discrepancy.is_some() {
                    return discrepancy;
                }
            }
            None
        }

        // Shape-only: declared key/value tags are not enforced.
        TypeExpr::Map { .. } => {
            if value.is_mapping() {
                None
            } else {
                Some(Discrepancy::ExpectedMap {
                    field: field.to_string(),
                    declared: declared.declared().to_string(),
                    actual: value.kind(),
                })
            }
        }

        // Shape-only: member tags and length are not enforced.
        TypeExpr::Tuple(_) => {
            if value.as_sequence().is_some() {
                None
            } else {
                Some(Discrepancy::ExpectedTuple {
                    field: field.to_string(),
                    declared: declared.declared().to_string(),
                    actual: value.kind(),
                })
            }
        }

        TypeExpr::Unsupported(raw) => Some(Discrepancy::UnsupportedType {
            field: field.to_string(),
            declared: raw.clone(),
        }),
    }
}

fn check_scalar(
    field: &str,
    value: &Value,
    scalar: ScalarType,
    declared: &str,
) -> Option<Discrepancy> {
    match scalar.shape() {
        ScalarShape::StringLike => {
            if value.is_string() {
                None
            } else {
                Some(Discrepancy::ExpectedString {
                    field: field.to_string(),
                    declared: declared.to_string(),
                    actual: value.kind(),
                })
            }
        }
        ScalarShape::Boolean => {
            if value.is_bool() {
                None
            } else {
                Some(Discrepancy::ExpectedBool {
                    field: field.to_string(),
                    actual: value.kind(),
                })
            }
        }
        ScalarShape::Numeric => {
            if value.is_number() {
                None
            } else {
                Some(Discrepancy::ExpectedNumeric {
                    field: field.to_string(),
                    declared: declared.to_string(),
                    actual: value.kind(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(doc: &str) -> Schema {
        doc.parse().expect("test schema should load")
    }

    fn record(json: &str) -> Record {
        serde_json::from_str(json).expect("test record should parse")
    }

    const ECS_SUBSET: &str = r#"
fields:
  "@timestamp":
    type: datetime
  source.ip:
    type: ip
  source.mac:
    type: mac
  destination.port:
    type: ui16
  event.duration:
    type: fp64
  event.success:
    type: bool
  message:
    type: text
  tags:
    type: "[str]"
  labels:
    type: "{str:any}"
  network.route:
    type: "(ip,ip)"
  metadata:
    type: any
"#;

    #[test]
    fn test_conforming_record_yields_no_discrepancies() {
        let record = record(
            r#"{
                "@timestamp": "2024-05-01T12:00:00Z",
                "source.ip": "192.168.0.7",
                "destination.port": 443,
                "event.duration": 0.25,
                "event.success": true,
                "message": "connection accepted",
                "tags": ["ingress", "tls"],
                "labels": {"env": "prod"},
                "network.route": ["10.0.0.1", "10.0.0.254"],
                "metadata": [1, {"deep": true}]
            }"#,
        );

        assert_eq!(validate_record(&record, &schema(ECS_SUBSET)), vec![]);
    }

    #[test]
    fn test_unknown_field_is_reported_without_a_type_check() {
        let record = record(r#"{"source.ipv6": ["bad", "values"]}"#);

        assert_eq!(
            validate_record(&record, &schema(ECS_SUBSET)),
            vec![Discrepancy::UnknownField {
                field: "source.ipv6".to_string(),
            }]
        );
    }

    #[test]
    fn test_wildcard_accepts_every_value_kind() {
        let schema = schema("fields:\n  declared:\n    type: any\n  implicit:\n");
        for value in ["null", "true", "3", "2.5", "\"x\"", "[1,2]", "{\"k\":1}"] {
            let record = record(&format!("{{\"declared\": {value}, \"implicit\": {value}}}"));
            assert_eq!(validate_record(&record, &schema), vec![], "value {value}");
        }
    }

    #[test]
    fn test_scalar_mismatches_per_shape() {
        let record = record(
            r#"{
                "source.ip": 3232235527,
                "event.success": "true",
                "destination.port": "443"
            }"#,
        );

        let discrepancies = validate_record(&record, &schema(ECS_SUBSET));
        assert_eq!(
            discrepancies,
            vec![
                Discrepancy::ExpectedNumeric {
                    field: "destination.port".to_string(),
                    declared: "ui16".to_string(),
                    actual: ValueKind::String,
                },
                Discrepancy::ExpectedBool {
                    field: "event.success".to_string(),
                    actual: ValueKind::String,
                },
                Discrepancy::ExpectedString {
                    field: "source.ip".to_string(),
                    declared: "ip".to_string(),
                    actual: ValueKind::Number,
                },
            ]
        );
    }

    #[test]
    fn test_null_satisfies_only_the_wildcard() {
        let record = record(r#"{"message": null, "metadata": null}"#);

        assert_eq!(
            validate_record(&record, &schema(ECS_SUBSET)),
            vec![Discrepancy::ExpectedString {
                field: "message".to_string(),
                declared: "text".to_string(),
                actual: ValueKind::Null,
            }]
        );
    }

    #[test]
    fn test_array_reports_first_failing_element_only() {
        let record = record(r#"{"tags": ["a", "b", 3, 4]}"#);

        assert_eq!(
            validate_record(&record, &schema(ECS_SUBSET)),
            vec![Discrepancy::ExpectedString {
                field: "tags[2]".to_string(),
                declared: "str".to_string(),
                actual: ValueKind::Number,
            }]
        );
    }

    #[test]
    fn test_array_requires_a_sequence() {
        let record = record(r#"{"tags": "ingress"}"#);

        assert_eq!(
            validate_record(&record, &schema(ECS_SUBSET)),
            vec![Discrepancy::ExpectedArray {
                field: "tags".to_string(),
                declared: "[str]".to_string(),
                actual: ValueKind::String,
            }]
        );
    }

    #[test]
    fn test_empty_sequence_satisfies_an_array() {
        let record = record(r#"{"tags": []}"#);
        assert_eq!(validate_record(&record, &schema(ECS_SUBSET)), vec![]);
    }

    #[test]
    fn test_map_is_shape_only() {
        let ok = record(r#"{"labels": {"env": "prod", "count": 3}}"#);
        assert_eq!(validate_record(&ok, &schema(ECS_SUBSET)), vec![]);

        let bad = record(r#"{"labels": ["env", "prod"]}"#);
        assert_eq!(
            validate_record(&bad, &schema(ECS_SUBSET)),
            vec![Discrepancy::ExpectedMap {
                field: "labels".to_string(),
                declared: "{str:any}".to_string(),
                actual: ValueKind::Sequence,
            }]
        );
    }

    #[test]
    fn test_tuple_is_shape_only_and_length_free() {
        for value in [r#"[]"#, r#"["10.0.0.1"]"#, r#"[1, 2, 3]"#] {
            let record = record(&format!("{{\"network.route\": {value}}}"));
            assert_eq!(validate_record(&record, &schema(ECS_SUBSET)), vec![], "value {value}");
        }

        let bad = record(r#"{"network.route": "10.0.0.1"}"#);
        assert_eq!(
            validate_record(&bad, &schema(ECS_SUBSET)),
            vec![Discrepancy::ExpectedTuple {
                field: "network.route".to_string(),
                declared: "(ip,ip)".to_string(),
                actual: ValueKind::String,
            }]
        );
    }

    #[test]
    fn test_unsupported_type_reports_but_other_fields_still_checked() {
        let schema = schema(
            "fields:\n  weird:\n    type: uuid\n  port:\n    type: ui16\n  host:\n    type: str\n",
        );
        let record = record(r#"{"weird": "anything", "port": "443", "host": "web-1"}"#);

        assert_eq!(
            validate_record(&record, &schema),
            vec![
                Discrepancy::ExpectedNumeric {
                    field: "port".to_string(),
                    declared: "ui16".to_string(),
                    actual: ValueKind::String,
                },
                Discrepancy::UnsupportedType {
                    field: "weird".to_string(),
                    declared: "uuid".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_array_of_wildcard_is_unsupported_per_element() {
        let schema = schema("fields:\n  items:\n    type: \"[any]\"\n");

        let empty = record(r#"{"items": []}"#);
        assert_eq!(validate_record(&empty, &schema), vec![]);

        let populated = record(r#"{"items": ["a", "b"]}"#);
        assert_eq!(
            validate_record(&populated, &schema),
            vec![Discrepancy::UnsupportedType {
                field: "items[0]".to_string(),
                declared: "any".to_string(),
            }]
        );
    }

    #[test]
    fn test_round_trip_two_fields() {
        let schema = schema("fields:\n  a:\n    type: str\n  b:\n    type: ui64\n");

        let ok = record(r#"{"a": "x", "b": 5}"#);
        assert_eq!(validate_record(&ok, &schema), vec![]);

        let swapped = record(r#"{"a": 5, "b": "x"}"#);
        let discrepancies = validate_record(&swapped, &schema);
        assert_eq!(discrepancies.len(), 2);
        assert_eq!(
            discrepancies,
            vec![
                Discrepancy::ExpectedString {
                    field: "a".to_string(),
                    declared: "str".to_string(),
                    actual: ValueKind::Number,
                },
                Discrepancy::ExpectedNumeric {
                    field: "b".to_string(),
                    declared: "ui64".to_string(),
                    actual: ValueKind::String,
                },
            ]
        );
    }

    #[test]
    fn test_rendered_message_format() {
        let schema = schema("fields:\n  tags:\n    type: \"[str]\"\n");
        let record = record(r#"{"tags": ["a", 1], "extra": true}"#);

        let rendered: Vec<String> = validate_record(&record, &schema)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                r#"unknown field "extra": not defined in schema"#,
                r#"field "tags[1]": expected string for type "str", got number"#,
            ]
        );
    }

    #[test]
    fn test_validation_is_pure_over_shared_schema() {
        // A single schema is safely shared by concurrent validations.
        let schema = schema(ECS_SUBSET);
        let good = record(r#"{"message": "ok"}"#);
        let bad = record(r#"{"message": 1}"#);

        std::thread::scope(|scope| {
            let schema = &schema;
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let target = if i % 2 == 0 { &good } else { &bad };
                    scope.spawn(move || validate_record(target, schema).len())
                })
                .collect();
            let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(counts, vec![0, 1, 0, 1]);
        });
    }
}
