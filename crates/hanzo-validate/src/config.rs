//! Configuration for Hanzo Validate

use crate::error::{Result, ValidateError};
use crate::messages::{supported_locales, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for Validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Locale used when a call does not request one
    pub default_locale: String,
    /// Compiled regex cache configuration
    pub pattern_cache: PatternCacheConfig,
    /// Audit configuration
    pub audit: AuditConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            pattern_cache: PatternCacheConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl ValidatorConfig {
    /// Create a config with every optional feature turned off
    pub fn minimal() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            pattern_cache: PatternCacheConfig {
                enabled: false,
                ..Default::default()
            },
            audit: AuditConfig {
                enabled: false,
                ..Default::default()
            },
        }
    }

    /// Parse a config from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings that cannot be honored
    ///
    /// An unsupported `default_locale` is an error here even though an
    /// unsupported per-call locale silently falls back.
    pub fn check(&self) -> Result<()> {
        if !supported_locales().any(|tag| tag == self.default_locale) {
            return Err(ValidateError::ConfigError(format!(
                "unsupported default_locale: {}",
                self.default_locale
            )));
        }
        if self.pattern_cache.enabled && self.pattern_cache.capacity == 0 {
            return Err(ValidateError::ConfigError(
                "pattern_cache.capacity must be positive when enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compiled regex cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternCacheConfig {
    /// Cache compiled `regex` rule patterns
    pub enabled: bool,
    /// Maximum number of distinct patterns kept
    pub capacity: usize,
}

impl Default for PatternCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 256,
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit events
    pub enabled: bool,
    /// Log offending field values (vs. just hashes)
    pub log_values: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_values: false, // Privacy by default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.default_locale, "en");
        assert!(config.pattern_cache.enabled);
        assert!(!config.audit.log_values);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ValidatorConfig::from_toml_str(
            r#"
            default_locale = "fr"

            [audit]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_locale, "fr");
        assert!(!config.audit.enabled);
        assert_eq!(config.pattern_cache.capacity, 256);
    }

    #[test]
    fn test_rejects_unknown_default_locale() {
        let err = ValidatorConfig::from_toml_str(r#"default_locale = "de""#).unwrap_err();
        assert!(matches!(err, ValidateError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = ValidatorConfig::from_toml_str("[pattern_cache]\ncapacity = 0").unwrap_err();
        assert!(matches!(err, ValidateError::ConfigError(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ValidatorConfig::from_toml_str("default_locale = ").unwrap_err();
        assert!(matches!(err, ValidateError::TomlError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_locale = \"es\"").unwrap();
        let config = ValidatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_locale, "es");

        let missing = ValidatorConfig::from_file("/nonexistent/validate.toml").unwrap_err();
        assert!(matches!(missing, ValidateError::IoError(_)));
    }
}
