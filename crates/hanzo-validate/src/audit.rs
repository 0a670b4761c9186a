//! Audit logging for Validator

use crate::config::AuditConfig;
use crate::rules::Rule;
use crate::types::{ValidationResult, Value};

#[cfg(feature = "audit")]
use std::collections::hash_map::DefaultHasher;
#[cfg(feature = "audit")]
use std::hash::{Hash, Hasher};

#[cfg(feature = "audit")]
use tracing::{debug, info};

/// Summary of one validation call
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Locale the messages were rendered in
    pub locale: &'static str,
    /// Outcome of the call
    pub outcome: AuditOutcome,
    /// Fields whose rules were evaluated
    pub fields_checked: usize,
    /// Entries in the result's error map
    pub error_count: usize,
    /// Fields replaced in sanitized output
    pub sanitized_fields: usize,
    /// Processing time in microseconds
    pub elapsed_us: u64,
}

impl AuditEntry {
    /// Summarize a finished validation call
    pub fn from_result(
        result: &ValidationResult,
        locale: &'static str,
        fields_checked: usize,
        sanitized_fields: usize,
        elapsed_us: u64,
    ) -> Self {
        Self {
            locale,
            outcome: AuditOutcome::from_result(result),
            fields_checked,
            error_count: result.errors.len(),
            sanitized_fields,
            elapsed_us,
        }
    }
}

/// Outcome for audit logging (simplified)
#[derive(Debug, Clone)]
pub enum AuditOutcome {
    /// Every field passed
    Passed,
    /// Validation stopped at this field
    Failed { field: String },
}

impl AuditOutcome {
    pub fn from_result(result: &ValidationResult) -> Self {
        match result.first_error() {
            Some((field, _)) => AuditOutcome::Failed {
                field: field.to_string(),
            },
            None => AuditOutcome::Passed,
        }
    }
}

/// Audit logger
pub struct AuditLogger {
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Check if events will be emitted
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Log the rule that stopped validation
    pub fn log_failure(&self, field: &str, rule: &Rule, value: Option<&Value>, locale: &str) {
        if !self.config.enabled {
            return;
        }

        #[cfg(feature = "audit")]
        debug!(
            field = field,
            rule = rule.name(),
            parameter = %rule.parameter_display(),
            locale = locale,
            value = %self.describe(value),
            "Validation rule failed"
        );

        #[cfg(not(feature = "audit"))]
        let _ = (field, rule, value, locale);
    }

    /// Log the summary of a validation call
    pub fn log_result(&self, entry: &AuditEntry) {
        if !self.config.enabled {
            return;
        }

        #[cfg(feature = "audit")]
        info!(
            locale = entry.locale,
            outcome = ?entry.outcome,
            fields_checked = entry.fields_checked,
            error_count = entry.error_count,
            sanitized_fields = entry.sanitized_fields,
            elapsed_us = entry.elapsed_us,
            "Validation audit"
        );

        #[cfg(not(feature = "audit"))]
        let _ = entry;
    }

    /// Render a value for logging: kind plus hash, or the value itself
    #[cfg(feature = "audit")]
    fn describe(&self, value: Option<&Value>) -> String {
        let Some(value) = value else {
            return "absent".to_string();
        };

        let rendered = serde_json::to_string(value).unwrap_or_default();
        if self.config.log_values {
            format!("{}:{}", value.kind(), truncate(&rendered, 100))
        } else {
            format!("{}#{}", value.kind(), hash_content(&rendered))
        }
    }
}

/// Hash content for audit (privacy-preserving)
#[cfg(feature = "audit")]
fn hash_content(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Truncate string for logging
#[cfg(feature = "audit")]
fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;

    #[cfg(feature = "audit")]
    #[test]
    fn test_hash_content() {
        let hash1 = hash_content("test");
        let hash2 = hash_content("test");
        let hash3 = hash_content("different");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[cfg(feature = "audit")]
    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a longer string", 10), "this is a ...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[cfg(feature = "audit")]
    #[test]
    fn test_describe_hides_values_by_default() {
        let logger = AuditLogger::new(AuditConfig::default());
        let described = logger.describe(Some(&Value::from("secret-password")));
        assert!(described.starts_with("string#"));
        assert!(!described.contains("secret"));
        assert_eq!(logger.describe(None), "absent");
    }

    #[cfg(feature = "audit")]
    #[test]
    fn test_describe_with_values() {
        let logger = AuditLogger::new(AuditConfig {
            enabled: true,
            log_values: true,
        });
        assert_eq!(logger.describe(Some(&Value::from(42))), "number:42");
        assert_eq!(logger.describe(Some(&Value::from(0.5))), "number:0.5");
    }

    #[test]
    fn test_outcome_from_result() {
        let failed = ValidationResult::invalid("age", "bad", Record::new(), Record::new());
        assert!(matches!(
            AuditOutcome::from_result(&failed),
            AuditOutcome::Failed { ref field } if field == "age"
        ));
        let passed = ValidationResult::valid(Record::new(), Record::new());
        assert!(matches!(AuditOutcome::from_result(&passed), AuditOutcome::Passed));
    }

    #[test]
    fn test_entry_counts_errors() {
        let failed = ValidationResult::invalid("age", "bad", Record::new(), Record::new());
        let entry = AuditEntry::from_result(&failed, "fr", 2, 1, 10);
        assert_eq!(entry.error_count, 1);
        assert_eq!(entry.fields_checked, 2);
        assert!(matches!(entry.outcome, AuditOutcome::Failed { ref field } if field == "age"));

        let passed = ValidationResult::valid(Record::new(), Record::new());
        assert_eq!(AuditEntry::from_result(&passed, "en", 3, 0, 10).error_count, 0);
    }

    #[test]
    fn test_audit_disabled() {
        let logger = AuditLogger::new(AuditConfig {
            enabled: false,
            ..Default::default()
        });

        // Should not panic when disabled
        assert!(!logger.enabled());
        logger.log_failure("name", &Rule::Required(true), None, "en");
        logger.log_result(&AuditEntry {
            locale: "en",
            outcome: AuditOutcome::Passed,
            fields_checked: 0,
            error_count: 0,
            sanitized_fields: 0,
            elapsed_us: 0,
        });
    }
}
