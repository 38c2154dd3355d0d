//! Type grammar and dynamic value model for record validation.
//!
//! This module defines the two vocabularies the validator mediates between:
//! the *type expressions* a schema declares for its fields ([`TypeExpr`],
//! [`ScalarType`]) and the *dynamic values* a record extractor produces
//! ([`Value`], [`Record`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed log record: field name → dynamically-typed value.
///
/// Produced by a record extractor and consumed read-only by
/// [`validate_record`](crate::validate_record). Backed by a `BTreeMap` so
/// field iteration order (and therefore discrepancy order) is deterministic.
pub type Record = BTreeMap<String, Value>;

/// Scalar type tags a schema may declare for a field.
///
/// The tag set is fixed. String-like tags all require a string value,
/// `bool` requires a boolean, and the numeric tags accept any numeric
/// value — the width and signedness in the tag name are documentation
/// only, no range or precision is enforced.
///
/// # Examples
///
/// ```
/// use record_schema_core::ScalarType;
///
/// assert_eq!(ScalarType::parse("ip"), Some(ScalarType::Ip));
/// assert_eq!(ScalarType::parse("ui64"), Some(ScalarType::Ui64));
/// assert_eq!(ScalarType::parse("uuid"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// Short string.
    Str,
    /// Timestamp rendered as a string.
    Datetime,
    /// IPv4/IPv6 address rendered as a string.
    Ip,
    /// MAC address rendered as a string.
    Mac,
    /// Geographic point rendered as a string.
    Geopoint,
    /// Free-form text.
    Text,
    /// Boolean.
    Bool,
    /// Unsigned integer, 8-bit.
    Ui8,
    /// Unsigned integer, 16-bit.
    Ui16,
    /// Unsigned integer, 64-bit.
    Ui64,
    /// Signed integer, 32-bit.
    Si32,
    /// Signed integer, 64-bit.
    Si64,
    /// Floating point, 16-bit.
    Fp16,
    /// Floating point, 32-bit.
    Fp32,
    /// Floating point, 64-bit.
    Fp64,
}

/// The value shape a scalar tag requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarShape {
    /// The value must be a string.
    StringLike,
    /// The value must be a boolean.
    Boolean,
    /// The value must be numeric (any width, integer or float).
    Numeric,
}

impl ScalarType {
    /// Parses a scalar tag. Tags are matched exactly; anything else is
    /// an unsupported type.
    pub fn parse(tag: &str) -> Option<ScalarType> {
        match tag {
            "str" => Some(ScalarType::Str),
            "datetime" => Some(ScalarType::Datetime),
            "ip" => Some(ScalarType::Ip),
            "mac" => Some(ScalarType::Mac),
            "geopoint" => Some(ScalarType::Geopoint),
            "text" => Some(ScalarType::Text),
            "bool" => Some(ScalarType::Bool),
            "ui8" => Some(ScalarType::Ui8),
            "ui16" => Some(ScalarType::Ui16),
            "ui64" => Some(ScalarType::Ui64),
            "si32" => Some(ScalarType::Si32),
            "si64" => Some(ScalarType::Si64),
            "fp16" => Some(ScalarType::Fp16),
            "fp32" => Some(ScalarType::Fp32),
            "fp64" => Some(ScalarType::Fp64),
            _ => None,
        }
    }

    /// Returns the tag exactly as it appears in schema documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Str => "str",
            ScalarType::Datetime => "datetime",
            ScalarType::Ip => "ip",
            ScalarType::Mac => "mac",
            ScalarType::Geopoint => "geopoint",
            ScalarType::Text => "text",
            ScalarType::Bool => "bool",
            ScalarType::Ui8 => "ui8",
            ScalarType::Ui16 => "ui16",
            ScalarType::Ui64 => "ui64",
            ScalarType::Si32 => "si32",
            ScalarType::Si64 => "si64",
            ScalarType::Fp16 => "fp16",
            ScalarType::Fp32 => "fp32",
            ScalarType::Fp64 => "fp64",
        }
    }

    /// Returns the value shape this tag requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_schema_core::{ScalarShape, ScalarType};
    ///
    /// assert_eq!(ScalarType::Datetime.shape(), ScalarShape::StringLike);
    /// assert_eq!(ScalarType::Fp32.shape(), ScalarShape::Numeric);
    /// ```
    pub fn shape(&self) -> ScalarShape {
        match self {
            ScalarType::Str
            | ScalarType::Datetime
            | ScalarType::Ip
            | ScalarType::Mac
            | ScalarType::Geopoint
            | ScalarType::Text => ScalarShape::StringLike,
            ScalarType::Bool => ScalarShape::Boolean,
            ScalarType::Ui8
            | ScalarType::Ui16
            | ScalarType::Ui64
            | ScalarType::Si32
            | ScalarType::Si64
            | ScalarType::Fp16
            | ScalarType::Fp32
            | ScalarType::Fp64 => ScalarShape::Numeric,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared element type of an array expression.
///
/// Array elements classify through the scalar path only: composite element
/// expressions (`[[str]]`), the wildcard (`[any]`), and unknown tags are
/// all carried as [`Unsupported`](ElementType::Unsupported) and reported
/// per element at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// A recognized scalar tag; every element must satisfy it.
    Scalar(ScalarType),
    /// Anything else, kept verbatim for the discrepancy message.
    Unsupported(String),
}

/// A parsed type expression.
///
/// The expression grammar classifies on the first and last character of
/// the raw string: `[T]` is an array, `{K:V}` a map, `(T1,T2,...)` a
/// tuple, and everything else a scalar tag. Expressions with mismatched
/// delimiters fall through to scalar classification and end up as
/// [`Unsupported`](TypeExpr::Unsupported), which surfaces as a per-field
/// discrepancy at validation time rather than a schema load error — one
/// bad field declaration must not block checking of the others.
///
/// Map key/value tags and tuple member tags are declared but only the
/// outer shape of the value is enforced.
///
/// # Examples
///
/// ```
/// use record_schema_core::{ElementType, ScalarType, TypeExpr};
///
/// assert_eq!(TypeExpr::parse("any"), TypeExpr::Any);
/// assert_eq!(TypeExpr::parse("bool"), TypeExpr::Scalar(ScalarType::Bool));
/// assert_eq!(
///     TypeExpr::parse("[str]"),
///     TypeExpr::Array(ElementType::Scalar(ScalarType::Str)),
/// );
/// assert_eq!(
///     TypeExpr::parse("{str"),
///     TypeExpr::Unsupported("{str".to_string()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// The wildcard: an empty expression or the literal `any`. Every
    /// value conforms.
    Any,
    /// A scalar tag.
    Scalar(ScalarType),
    /// `[T]` — the value must be a sequence and every element must
    /// satisfy `T`.
    Array(ElementType),
    /// `{K:V}` — the value must be a mapping; `K`/`V` are declarative.
    Map {
        /// Declared key tag (not enforced).
        key: String,
        /// Declared value tag (not enforced).
        value: String,
    },
    /// `(T1,T2,...)` — the value must be a sequence; member tags are
    /// declarative and the length is not checked.
    Tuple(Vec<String>),
    /// An unrecognized or malformed expression, kept verbatim.
    Unsupported(String),
}

impl TypeExpr {
    /// Parses a raw type expression. Never fails: unknown or malformed
    /// input becomes [`TypeExpr::Unsupported`].
    pub fn parse(raw: &str) -> TypeExpr {
        if raw.is_empty() || raw == "any" {
            return TypeExpr::Any;
        }

        if let Some(inner) = delimited(raw, '[', ']') {
            let elem = match ScalarType::parse(inner) {
                Some(scalar) => ElementType::Scalar(scalar),
                None => ElementType::Unsupported(inner.to_string()),
            };
            return TypeExpr::Array(elem);
        }

        if let Some(inner) = delimited(raw, '{', '}') {
            let (key, value) = inner.split_once(':').unwrap_or((inner, ""));
            return TypeExpr::Map {
                key: key.to_string(),
                value: value.to_string(),
            };
        }

        if let Some(inner) = delimited(raw, '(', ')') {
            let members = inner.split(',').map(|tag| tag.trim().to_string()).collect();
            return TypeExpr::Tuple(members);
        }

        match ScalarType::parse(raw) {
            Some(scalar) => TypeExpr::Scalar(scalar),
            None => TypeExpr::Unsupported(raw.to_string()),
        }
    }
}

/// Returns the text between `open` and `close` if `raw` starts and ends
/// with them. A single delimiter character is not a match.
fn delimited(raw: &str, open: char, close: char) -> Option<&str> {
    raw.strip_prefix(open)?.strip_suffix(close)
}

/// A dynamically-typed record value.
///
/// The closed set of shapes a record extractor can produce: scalars
/// (null, boolean, number, string) and the two composites (sequence,
/// mapping). Numbers carry any width, integer or floating-point. The
/// untagged serde representation round-trips through JSON unchanged, so
/// a JSON object deserializes directly into a [`Record`].
///
/// # Examples
///
/// ```
/// use record_schema_core::{Record, Value, ValueKind};
///
/// let record: Record = serde_json::from_str(r#"{"host": "web-1", "port": 443}"#).unwrap();
/// assert_eq!(record["host"], Value::String("web-1".to_string()));
/// assert_eq!(record["port"].kind(), ValueKind::Number);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number of any width, integer or floating-point.
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// A mapping from string keys to values.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the kind of this value, for dispatch and messages.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` if this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this value is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this value is numeric.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this value is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns the elements if this value is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// The kind of a [`Value`], as named in discrepancy messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A null value.
    Null,
    /// A boolean value.
    Bool,
    /// A numeric value.
    Number,
    /// A string value.
    String,
    /// A sequence value.
    Sequence,
    /// A mapping value.
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}
