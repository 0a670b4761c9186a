//! Core types for Hanzo Validate

use crate::error::{Result, ValidateError};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// An input record: field name to value, in insertion order
pub type Record = IndexMap<String, Value>;

/// A dynamically-typed field value
///
/// A key that is missing from a [`Record`] is "absent" and is modelled as
/// `Option::<&Value>::None` by the engine, which is distinct from
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer, kept exact
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point (may be NaN when built from Rust)
    Float(f64),
    /// String
    String(String),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Keyed mapping
    Object(Record),
    /// Calendar date/time, serialized as RFC 3339
    Date(DateTime<Utc>),
}

impl Value {
    /// Get the string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is an explicit null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the runtime kind, used in audit events
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Date(_) => "date",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::UInt(u) => serde_json::Value::Number(u.into()),
            Value::Float(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Date(dt) => serde_json::Value::String(dt.to_rfc3339()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(n),
        }
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Value::Object(map)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Date(dt)
    }
}

/// Convert a JSON document into a [`Record`]
///
/// Fails when the document is not a JSON object.
pub fn record_from_json(value: serde_json::Value) -> Result<Record> {
    match Value::from(value) {
        Value::Object(record) => Ok(record),
        other => Err(ValidateError::InvalidRecord(format!(
            "expected an object, found {}",
            other.kind()
        ))),
    }
}

/// Per-call validation options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Locale tag for error messages; unknown tags fall back to `en`
    #[serde(default)]
    pub locale: Option<String>,
}

impl ValidateOptions {
    /// Create options with no locale override
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Outcome of one validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub is_valid: bool,
    /// Field name to localized message; at most one entry
    pub errors: IndexMap<String, String>,
    /// Copy of the input with sanitize-enabled fields replaced
    pub sanitized_data: Record,
    /// Copy of the original input
    pub raw_data: Record,
}

impl ValidationResult {
    /// Build a passing result
    pub fn valid(sanitized_data: Record, raw_data: Record) -> Self {
        Self {
            is_valid: true,
            errors: IndexMap::new(),
            sanitized_data,
            raw_data,
        }
    }

    /// Build a failing result carrying a single field error
    pub fn invalid(
        field: impl Into<String>,
        message: impl Into<String>,
        sanitized_data: Record,
        raw_data: Record,
    ) -> Self {
        let mut errors = IndexMap::new();
        errors.insert(field.into(), message.into());
        Self {
            is_valid: false,
            errors,
            sanitized_data,
            raw_data,
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the error message for a field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Get the first (and only) reported error
    pub fn first_error(&self) -> Option<(&str, &str)> {
        self.errors
            .first()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Serialize the result as a JSON document
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
