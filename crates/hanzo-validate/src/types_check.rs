//! Runtime type predicates used by the `type` rule

use crate::types::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Deliberately loose; not RFC 5322.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Type tags accepted by the `type` rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
    Email,
}

impl TypeName {
    /// All supported type tags
    pub const ALL: [TypeName; 7] = [
        TypeName::String,
        TypeName::Number,
        TypeName::Boolean,
        TypeName::Array,
        TypeName::Object,
        TypeName::Date,
        TypeName::Email,
    ];

    /// Tag as written in a schema
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::String => "string",
            TypeName::Number => "number",
            TypeName::Boolean => "boolean",
            TypeName::Array => "array",
            TypeName::Object => "object",
            TypeName::Date => "date",
            TypeName::Email => "email",
        }
    }

    /// Test a value against this type
    pub fn check(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeName::String, Value::String(_)) => true,
            (TypeName::Number, Value::Int(_) | Value::UInt(_)) => true,
            (TypeName::Number, Value::Float(n)) => !n.is_nan(),
            (TypeName::Boolean, Value::Bool(_)) => true,
            (TypeName::Array, Value::Array(_)) => true,
            (TypeName::Object, Value::Object(_)) => true,
            (TypeName::Date, Value::Date(_)) => true,
            (TypeName::Email, Value::String(s)) => is_valid_email(s),
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown type: {}", s))
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a possibly-absent value against a type name
///
/// Absent values and unknown type names both fail.
pub fn check_type(type_name: &str, value: Option<&Value>) -> bool {
    match (type_name.parse::<TypeName>(), value) {
        (Ok(t), Some(v)) => t.check(v),
        _ => false,
    }
}
