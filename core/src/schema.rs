//! Schema model: loading and representing the declared field set.
//!
//! A schema document maps field names to type expressions:
//!
//! ```yaml
//! fields:
//!   source.ip:
//!     type: ip
//!   tags:
//!     type: "[str]"
//! ```
//!
//! Documents are parsed as YAML; since the document shape uses only the
//! JSON-compatible subset, JSON schema files load through the same path.
//! Type expressions are parsed once here, at load time, so the validator
//! never re-parses them per record.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::TypeExpr;

/// Errors from loading a schema document.
///
/// Unsupported type *expressions* are not load errors: they are kept as
/// data and reported per field at validation time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema source could not be read.
    #[error("reading schema: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be deserialized into the expected shape.
    #[error("parsing schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document has no `fields` mapping, or an empty one. A schema
    /// declaring no fields would reject every record field as unknown,
    /// which is never the intent.
    #[error("schema has no 'fields' section")]
    NoFields,
}

/// The declared type of one schema field: the raw expression string as
/// written in the document, plus its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    raw: String,
    expr: TypeExpr,
}

impl FieldType {
    fn new(raw: String) -> Self {
        let expr = TypeExpr::parse(&raw);
        Self { raw, expr }
    }

    /// The type expression exactly as declared. Discrepancy messages
    /// quote this verbatim.
    pub fn declared(&self) -> &str {
        &self.raw
    }

    /// The parsed expression.
    pub fn expr(&self) -> &TypeExpr {
        &self.expr
    }
}

/// An immutable mapping from field name to declared type.
///
/// Loaded once per run and shared read-only across any number of record
/// validations; nothing here is mutated after loading.
///
/// # Examples
///
/// ```
/// use record_schema_core::{ScalarType, Schema, TypeExpr};
///
/// let schema: Schema = r#"
/// fields:
///   source.ip:
///     type: ip
///   message:
///     type: text
///   labels:
/// "#
/// .parse()
/// .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// assert!(schema.contains("message"));
/// // A field without a declared type is the wildcard.
/// assert_eq!(schema.get("labels").unwrap().expr(), &TypeExpr::Any);
/// assert_eq!(
///     schema.get("source.ip").unwrap().expr(),
///     &TypeExpr::Scalar(ScalarType::Ip),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    fields: BTreeMap<String, FieldType>,
}

/// On-disk document shape. Per-field keys other than `type` (descriptions
/// and the like) are ignored.
#[derive(Debug, Deserialize)]
struct SchemaDoc {
    fields: Option<BTreeMap<String, Option<FieldDoc>>>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldDoc {
    #[serde(rename = "type", default)]
    type_expr: String,
}

impl Schema {
    /// Loads a schema document from a file.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Io`] if the file cannot be read,
    /// [`SchemaError::Parse`] if it cannot be deserialized, and
    /// [`SchemaError::NoFields`] if the `fields` mapping is absent or
    /// empty.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let doc = fs::read_to_string(path)?;
        doc.parse()
    }

    /// Looks up the declared type of a field.
    pub fn get(&self, field: &str) -> Option<&FieldType> {
        self.fields.get(field)
    }

    /// Returns `true` if the schema declares `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of declared fields. Never zero: an empty
    /// schema fails to load.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema declares no fields. Always `false`
    /// for a loaded schema; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over declared fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(doc: &str) -> Result<Self, SchemaError> {
        // An entirely empty document deserializes as `None` rather than
        // failing, so it reports NoFields like a missing `fields` key.
        let doc: Option<SchemaDoc> = serde_yaml::from_str(doc)?;
        let fields = doc.and_then(|doc| doc.fields).unwrap_or_default();
        if fields.is_empty() {
            return Err(SchemaError::NoFields);
        }

        let fields = fields
            .into_iter()
            .map(|(name, field)| {
                let raw = field.unwrap_or_default().type_expr;
                (name, FieldType::new(raw))
            })
            .collect();
        Ok(Self { fields })
    }
}
