//! Rule definitions and evaluation

use crate::patterns::PatternCache;
use crate::sanitize::sanitize;
use crate::types::Value;
use crate::types_check::TypeName;

/// A single named constraint applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present, non-null and not the empty string
    Required(bool),
    /// String with at least this many characters
    MinLength(f64),
    /// String with at most this many characters
    MaxLength(f64),
    /// Runtime type check
    Type(TypeRule),
    /// String matching a pattern
    ///
    /// Patterns use the `regex` crate syntax, not ECMAScript. Lookaround and
    /// backreferences do not compile, so a rule using them always fails.
    /// `\d`, `\w` and `\s` are Unicode-aware; write `[0-9]` or `(?-u:\d)`
    /// for ASCII-only classes.
    Regex(String),
    /// Replace the field in sanitized output with its cleaned value
    Sanitize(bool),
    /// Any rule name this crate does not know; always passes
    Unknown {
        name: String,
        parameter: serde_json::Value,
    },
}

/// Target of a `type` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRule {
    Known(TypeName),
    /// Unrecognized type name; the rule fails closed
    Unknown(String),
}

impl TypeRule {
    /// Name as it appears in messages
    pub fn as_str(&self) -> &str {
        match self {
            TypeRule::Known(t) => t.as_str(),
            TypeRule::Unknown(name) => name,
        }
    }
}

/// Result of evaluating one rule against one value
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail,
    /// Passed, and the field's output value should become this
    Replace(Value),
}

impl Outcome {
    /// Check if the rule failed
    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail)
    }
}

impl Rule {
    /// Build a rule from a schema entry, coercing the parameter
    ///
    /// Never fails: unknown names become [`Rule::Unknown`] and unusable
    /// parameters produce rules that fail closed.
    pub fn from_json(name: &str, parameter: &serde_json::Value) -> Self {
        match name {
            "required" => Rule::Required(truthy(parameter)),
            "minLength" => Rule::MinLength(numeric(parameter)),
            "maxLength" => Rule::MaxLength(numeric(parameter)),
            "type" => Rule::Type(match parameter.as_str() {
                Some(s) => match s.parse::<TypeName>() {
                    Ok(t) => TypeRule::Known(t),
                    Err(_) => TypeRule::Unknown(s.to_string()),
                },
                None => TypeRule::Unknown(parameter.to_string()),
            }),
            "regex" => Rule::Regex(match parameter.as_str() {
                Some(s) => s.to_string(),
                None => parameter.to_string(),
            }),
            "sanitize" => Rule::Sanitize(truthy(parameter)),
            _ => Rule::Unknown {
                name: name.to_string(),
                parameter: parameter.clone(),
            },
        }
    }

    /// Rule name as written in a schema
    pub fn name(&self) -> &str {
        match self {
            Rule::Required(_) => "required",
            Rule::MinLength(_) => "minLength",
            Rule::MaxLength(_) => "maxLength",
            Rule::Type(_) => "type",
            Rule::Regex(_) => "regex",
            Rule::Sanitize(_) => "sanitize",
            Rule::Unknown { name, .. } => name,
        }
    }

    /// Parameter in the form substituted into messages
    pub fn parameter_display(&self) -> String {
        match self {
            Rule::Required(b) | Rule::Sanitize(b) => b.to_string(),
            Rule::MinLength(n) | Rule::MaxLength(n) => n.to_string(),
            Rule::Type(t) => t.as_str().to_string(),
            Rule::Regex(pattern) => pattern.clone(),
            Rule::Unknown { parameter, .. } => match parameter.as_str() {
                Some(s) => s.to_string(),
                None => parameter.to_string(),
            },
        }
    }

    /// Localized error message for this rule
    pub fn message(&self, locale: &str) -> String {
        crate::messages::message(self.name(), &self.parameter_display(), locale)
    }

    /// Evaluate against a possibly-absent value
    pub fn evaluate(&self, value: Option<&Value>, patterns: &PatternCache) -> Outcome {
        let passed = match self {
            Rule::Required(false) => true,
            Rule::Required(true) => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            Rule::MinLength(min) => string_len(value).is_some_and(|len| len >= *min),
            Rule::MaxLength(max) => string_len(value).is_some_and(|len| len <= *max),
            Rule::Type(TypeRule::Known(t)) => value.is_some_and(|v| t.check(v)),
            Rule::Type(TypeRule::Unknown(_)) => false,
            Rule::Regex(pattern) => match value {
                Some(Value::String(s)) => patterns.is_match(pattern, s),
                _ => false,
            },
            Rule::Sanitize(enabled) => {
                return match value {
                    Some(v) if *enabled => Outcome::Replace(sanitize(v)),
                    _ => Outcome::Pass,
                };
            }
            Rule::Unknown { .. } => true,
        };

        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

/// Character count of a string value; `None` for anything else
fn string_len(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::String(s)) => Some(s.chars().count() as f64),
        _ => None,
    }
}

/// Loose truthiness for boolean parameters
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Numeric parameter; NaN when unusable so comparisons fail
fn numeric(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
