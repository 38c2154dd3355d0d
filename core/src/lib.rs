//! Core schema model and record validation.
//!
//! This crate checks parsed log records — loosely-typed field → value
//! mappings — against a declarative schema that names the expected fields
//! and their value shapes. It is a structural conformance checker, not a
//! parser: turning raw log bytes into a [`Record`] is the job of a record
//! extractor (see the `record-schema-extract` crate).
//!
//! - [`Schema`] — the immutable field → type-expression mapping, loaded
//!   from a YAML/JSON document.
//! - [`TypeExpr`] / [`ScalarType`] — the type grammar: scalar tags, the
//!   `any` wildcard, arrays `[T]`, maps `{K:V}`, and tuples `(T1,T2)`.
//! - [`Value`] / [`Record`] — the dynamic values a record extractor
//!   produces.
//! - [`validate_record`] — walks a record against a schema and collects
//!   every [`Discrepancy`].
//!
//! Validation never fails as an operation: discrepancies are data, and a
//! record with a bad field still has its other fields checked. Both
//! [`Schema`] and [`Record`] are plain immutable values, so one schema
//! can back any number of concurrent validations.
//!
//! # Example
//!
//! ```
//! use record_schema_core::{Record, Schema, validate_record};
//!
//! let schema: Schema = r#"
//! fields:
//!   source.ip:
//!     type: ip
//!   tags:
//!     type: "[str]"
//! "#
//! .parse()
//! .unwrap();
//!
//! let record: Record = serde_json::from_str(
//!     r#"{"source.ip": "10.1.2.3", "tags": ["ingress", 7]}"#,
//! )
//! .unwrap();
//!
//! let discrepancies = validate_record(&record, &schema);
//! assert_eq!(discrepancies.len(), 1);
//! assert_eq!(
//!     discrepancies[0].to_string(),
//!     r#"field "tags[1]": expected string for type "str", got number"#,
//! );
//! ```

mod schema;
mod types;
mod validate;

pub use schema::{FieldType, Schema, SchemaError};
pub use types::{ElementType, Record, ScalarShape, ScalarType, TypeExpr, Value, ValueKind};
pub use validate::{Discrepancy, validate_record};
