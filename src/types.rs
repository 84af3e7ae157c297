use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// A single scalar with its serialization kind made explicit.
///
/// The kind is chosen by whoever builds the row, not inferred at render
/// time, so the literal form each value takes in a statement is never
/// ambiguous:
/// ```rust
/// use mysql_middleware::prelude::*;
///
/// let row = RowSpec::fields([
///     ("id", Value::Int(1)),
///     ("name", Value::Text("alice".into())),
/// ]);
/// # let _ = row;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value (64-bit); renders as an unquoted decimal literal
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text value; renders single-quoted
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value; renders as the literal `NULL`
    Null,
    /// JSON value; renders as its quoted serialized form
    Json(JsonValue),
    /// Binary data; renders as a hex literal
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(v) = self { Some(*v) } else { None }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let Value::Float(v) = self { Some(*v) } else { None }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(v) = self { Some(v) } else { None }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            // MySQL surfaces BOOLEAN columns as TINYINT
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(v) => Some(*v),
            Value::Text(s) => {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f"))
                    .ok()
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let Value::Bytes(v) = self { Some(v) } else { None }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// One row's worth of data as the caller supplied it.
///
/// The two call-site shapes the statement builder accepts: an ordered
/// field/value mapping (column names come from the row itself), or bare
/// positional values (column names come from schema introspection, taking a
/// prefix matching the row's arity).
#[derive(Debug, Clone, PartialEq)]
pub enum RowSpec {
    /// Named fields, in the order given
    Fields(Vec<(String, Value)>),
    /// Positional values, zipped against introspected columns
    Values(Vec<Value>),
}

impl RowSpec {
    /// Build a named-field row, preserving field order.
    pub fn fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        RowSpec::Fields(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a positional row.
    pub fn values<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        RowSpec::Values(values.into_iter().map(Into::into).collect())
    }

    /// Number of columns this row will occupy in a statement.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            RowSpec::Fields(fields) => fields.len(),
            RowSpec::Values(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_positional(&self) -> bool {
        matches!(self, RowSpec::Values(_))
    }
}

impl From<Vec<Value>> for RowSpec {
    fn from(values: Vec<Value>) -> Self {
        RowSpec::Values(values)
    }
}
