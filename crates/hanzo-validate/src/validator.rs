//! Main Validator implementation

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{AuditConfig, PatternCacheConfig, ValidatorConfig};
use crate::error::{Result, ValidateError};
use crate::messages::resolve_locale;
use crate::patterns::PatternCache;
use crate::rules::{Outcome, Rule};
use crate::schema::{RuleSet, Schema};
use crate::types::{record_from_json, Record, ValidateOptions, ValidationResult, Value};
use once_cell::sync::Lazy;
use std::time::Instant;

static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::default);

/// Validate a record against a schema with the default validator
///
/// Fail-fast: validation stops at the first field whose rules fail and
/// only that field is reported.
pub fn validate(data: &Record, schema: &Schema, options: &ValidateOptions) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(data, schema, options)
}

/// Rule evaluation engine
///
/// Holds no per-call state, so one instance can be shared across threads.
pub struct Validator {
    config: ValidatorConfig,
    patterns: PatternCache,
    audit_logger: AuditLogger,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

/// How one field's rules came out
enum FieldOutcome<'r> {
    Passed { replacement: Option<Value> },
    Failed { rule: &'r Rule },
}

impl Validator {
    /// Create a new Validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            patterns: PatternCache::new(config.pattern_cache.clone()),
            audit_logger: AuditLogger::new(config.audit.clone()),
            config,
        }
    }

    /// Create a builder for Validator
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a record against a schema
    ///
    /// Fields are visited in schema order and rules in declaration order.
    /// The first failing rule ends the whole call with a single localized
    /// error. Fields with `sanitize` enabled are replaced in the sanitized
    /// copy once all their rules pass; input keys outside the schema are
    /// copied unchanged.
    pub fn validate(
        &self,
        data: &Record,
        schema: &Schema,
        options: &ValidateOptions,
    ) -> ValidationResult {
        let start = Instant::now();
        let locale = resolve_locale(
            options
                .locale
                .as_deref()
                .unwrap_or(&self.config.default_locale),
        );

        let mut sanitized_data = data.clone();
        let mut fields_checked = 0;
        let mut sanitized_fields = 0;

        for (field, rules) in schema.iter() {
            if rules.is_empty() {
                continue;
            }
            fields_checked += 1;

            let value = data.get(field);
            match self.check_field(value, rules) {
                FieldOutcome::Failed { rule } => {
                    self.audit_logger.log_failure(field, rule, value, locale);
                    let result = ValidationResult::invalid(
                        field,
                        rule.message(locale),
                        sanitized_data,
                        data.clone(),
                    );
                    self.audit(&result, locale, fields_checked, sanitized_fields, start);
                    return result;
                }
                FieldOutcome::Passed {
                    replacement: Some(cleaned),
                } => {
                    sanitized_data.insert(field.to_string(), cleaned);
                    sanitized_fields += 1;
                }
                FieldOutcome::Passed { replacement: None } => {}
            }
        }

        let result = ValidationResult::valid(sanitized_data, data.clone());
        self.audit(&result, locale, fields_checked, sanitized_fields, start);
        result
    }

    /// Validate JSON documents
    ///
    /// Both documents must be JSON objects; shape errors are returned before
    /// any rule runs.
    pub fn validate_json(
        &self,
        data: &serde_json::Value,
        schema: &serde_json::Value,
        options: &ValidateOptions,
    ) -> Result<ValidationResult> {
        let schema = Schema::from_json(schema)?;
        let data = record_from_json(data.clone())?;
        Ok(self.validate(&data, &schema, options))
    }

    /// Validate from JSON strings
    pub fn validate_json_str(
        &self,
        data: &str,
        schema: &str,
        options: &ValidateOptions,
    ) -> Result<ValidationResult> {
        let data: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| ValidateError::InvalidRecord(e.to_string()))?;
        let schema: serde_json::Value = serde_json::from_str(schema)
            .map_err(|e| ValidateError::InvalidSchema(e.to_string()))?;
        self.validate_json(&data, &schema, options)
    }

    /// Evaluate one field's rules in order, stopping at the first failure
    fn check_field<'r>(&self, value: Option<&Value>, rules: &'r RuleSet) -> FieldOutcome<'r> {
        let mut replacement = None;

        for rule in rules.iter() {
            match rule.evaluate(value, &self.patterns) {
                Outcome::Pass => {}
                Outcome::Fail => return FieldOutcome::Failed { rule },
                Outcome::Replace(cleaned) => replacement = Some(cleaned),
            }
        }

        FieldOutcome::Passed { replacement }
    }

    fn audit(
        &self,
        result: &ValidationResult,
        locale: &'static str,
        fields_checked: usize,
        sanitized_fields: usize,
        start: Instant,
    ) {
        if !self.audit_logger.enabled() {
            return;
        }

        self.audit_logger.log_result(&AuditEntry::from_result(
            result,
            locale,
            fields_checked,
            sanitized_fields,
            start.elapsed().as_micros() as u64,
        ));
    }
}

/// Builder for Validator configuration
pub struct ValidatorBuilder {
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    /// Turn off caching and auditing
    pub fn minimal(mut self) -> Self {
        self.config = ValidatorConfig::minimal();
        self
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the locale used when a call does not request one
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.default_locale = locale.into();
        self
    }

    /// Configure the compiled pattern cache
    pub fn with_pattern_cache(mut self, config: PatternCacheConfig) -> Self {
        self.config.pattern_cache = config;
        self
    }

    /// Configure audit logging
    pub fn with_audit(mut self, config: AuditConfig) -> Self {
        self.config.audit = config;
        self
    }

    /// Build the Validator
    pub fn build(self) -> Validator {
        Validator::new(self.config)
    }

    /// Build the Validator, rejecting unsupported settings
    pub fn try_build(self) -> Result<Validator> {
        self.config.check()?;
        Ok(Validator::new(self.config))
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
