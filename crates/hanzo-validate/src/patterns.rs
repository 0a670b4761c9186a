//! Compiled pattern cache for the `regex` rule

use crate::config::PatternCacheConfig;
use regex::Regex;

#[cfg(feature = "pattern-cache")]
use dashmap::DashMap;

/// Compiles `regex` rule patterns, optionally caching them by source string
///
/// Caching never changes match results. Patterns that fail to compile are
/// remembered as failures too, so a bad pattern is only compiled once.
/// Syntax is the `regex` crate's: no lookaround or backreferences, and
/// Perl classes such as `\d` match Unicode.
pub struct PatternCache {
    #[allow(dead_code)]
    config: PatternCacheConfig,
    #[cfg(feature = "pattern-cache")]
    compiled: DashMap<String, Option<Regex>>,
}

impl PatternCache {
    /// Create a new cache
    pub fn new(config: PatternCacheConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "pattern-cache")]
            compiled: DashMap::new(),
        }
    }

    /// Check whether `text` matches `pattern`
    ///
    /// An invalid pattern never matches.
    pub fn is_match(&self, pattern: &str, text: &str) -> bool {
        self.get(pattern).is_some_and(|re| re.is_match(text))
    }

    /// Number of cached entries
    #[cfg(feature = "pattern-cache")]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Number of cached entries (always zero when feature disabled)
    #[cfg(not(feature = "pattern-cache"))]
    pub fn len(&self) -> usize {
        0
    }

    #[cfg(feature = "pattern-cache")]
    fn get(&self, pattern: &str) -> Option<Regex> {
        if !self.config.enabled {
            return compile(pattern);
        }

        if let Some(entry) = self.compiled.get(pattern) {
            return entry.value().clone();
        }

        let compiled = compile(pattern);
        if self.compiled.len() < self.config.capacity {
            self.compiled.insert(pattern.to_string(), compiled.clone());
        }
        compiled
    }

    #[cfg(not(feature = "pattern-cache"))]
    fn get(&self, pattern: &str) -> Option<Regex> {
        compile(pattern)
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(_e) => {
            #[cfg(feature = "audit")]
            tracing::warn!(pattern = pattern, error = %_e, "Invalid regex rule pattern");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match() {
        let cache = PatternCache::new(PatternCacheConfig::default());
        assert!(cache.is_match("^h.*o$", "hello"));
        assert!(!cache.is_match("^h.*o$", "world"));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let cache = PatternCache::new(PatternCacheConfig::default());
        assert!(!cache.is_match("([a-z", "abc"));
        assert!(!cache.is_match("([a-z", "abc"));
    }

    #[test]
    #[cfg(feature = "pattern-cache")]
    fn test_cache_respects_capacity() {
        let cache = PatternCache::new(PatternCacheConfig {
            enabled: true,
            capacity: 2,
        });
        assert!(cache.is_match("a", "a"));
        assert!(cache.is_match("b", "b"));
        assert!(cache.is_match("c", "c"));
        assert_eq!(cache.len(), 2);
        // uncached pattern still evaluates
        assert!(!cache.is_match("c", "d"));
    }

    #[test]
    #[cfg(feature = "pattern-cache")]
    fn test_cache_disabled() {
        let cache = PatternCache::new(PatternCacheConfig {
            enabled: false,
            ..Default::default()
        });
        assert!(cache.is_match("^[0-9]+$", "123"));
        assert_eq!(cache.len(), 0);
    }
}
