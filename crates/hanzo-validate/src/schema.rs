//! Schema model: ordered fields, each with an ordered rule set

use crate::error::{Result, ValidateError};
use crate::rules::{Rule, TypeRule};
use crate::types_check::TypeName;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Ordered rules configured for one field
///
/// Behaves like a map keyed by rule name: adding a rule whose name is
/// already present replaces it in place, keeping its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON rule object
    ///
    /// Anything other than an object yields an empty rule set.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut set = Self::new();
        if let Some(map) = value.as_object() {
            for (name, parameter) in map {
                set.push(Rule::from_json(name, parameter));
            }
        }
        set
    }

    /// Add a rule, replacing any rule with the same name
    pub fn push(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.name() == rule.name()) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Add a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// Add a `required` rule
    pub fn required(self, required: bool) -> Self {
        self.rule(Rule::Required(required))
    }

    /// Add a `minLength` rule
    pub fn min_length(self, min: usize) -> Self {
        self.rule(Rule::MinLength(min as f64))
    }

    /// Add a `maxLength` rule
    pub fn max_length(self, max: usize) -> Self {
        self.rule(Rule::MaxLength(max as f64))
    }

    /// Add a `type` rule
    pub fn of_type(self, type_name: TypeName) -> Self {
        self.rule(Rule::Type(TypeRule::Known(type_name)))
    }

    /// Add a `regex` rule
    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.rule(Rule::Regex(pattern.into()))
    }

    /// Add a `sanitize` rule
    pub fn sanitize(self, enabled: bool) -> Self {
        self.rule(Rule::Sanitize(enabled))
    }

    /// Iterate rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Field name to rule set, in validation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, RuleSet>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style)
    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.insert(name, rules);
        self
    }

    /// Add or replace a field
    pub fn insert(&mut self, name: impl Into<String>, rules: RuleSet) {
        self.fields.insert(name.into(), rules);
    }

    /// Build from a JSON schema document
    ///
    /// The document must be an object. Field entries that are not objects
    /// are kept as fields with no rules.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            ValidateError::InvalidSchema(format!("expected an object, found {}", json_kind(value)))
        })?;

        Ok(Self {
            fields: map
                .iter()
                .map(|(name, rules)| (name.clone(), RuleSet::from_json(rules)))
                .collect(),
        })
    }

    /// Parse a JSON schema string
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    /// Iterate fields in validation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Get the rules for a field
    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Schema::from_json(&value).map_err(serde::de::Error::custom)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
