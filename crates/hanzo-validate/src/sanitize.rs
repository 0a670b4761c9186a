//! String sanitization pipeline
//!
//! A layered regex blocklist, applied in a fixed order:
//!
//! 1. trim surrounding whitespace
//! 2. drop complete `<script>...</script>` blocks
//! 3. drop inline `on<event>="..."` handlers
//! 4. drop `javascript:` schemes
//! 5. drop SQL metacharacters (`'`, `"`, `;`)
//! 6. drop any remaining `<...>` tag
//! 7. drop zero-width characters
//!
//! The narrower patterns run before the generic tag stripper so they still
//! see intact tag structure.
//!
//! ## Limitations
//!
//! This is not an HTML parser. Entities are not decoded and the output is
//! not re-sanitized, so encoded (`&lt;script&gt;`) or split payloads can
//! survive. `.` does not cross newlines, so a script block whose body spans
//! lines is left to step 6, which removes the tags but keeps the body text.
//!
//! Trimming runs first, so whitespace exposed by a later removal stays:
//! `"hello <br>"` becomes `"hello "`, and only a second pass yields
//! `"hello"`. The pipeline is idempotent on markup-free text only.

use crate::types::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERNS: Lazy<SanitizePatterns> = Lazy::new(SanitizePatterns::new);

struct SanitizePatterns {
    script_tags: Regex,
    event_handlers: Regex,
    js_protocol: Regex,
    sql_meta_chars: Regex,
    html_tags: Regex,
    zero_width: Regex,
}

impl SanitizePatterns {
    fn new() -> Self {
        Self {
            script_tags: Regex::new(r"(?i)<script.*?>.*?</script>").unwrap(),
            event_handlers: Regex::new(r#"(?i)on[0-9a-z_]+=".*?""#).unwrap(),
            js_protocol: Regex::new(r"(?i)javascript:").unwrap(),
            sql_meta_chars: Regex::new(r#"['";]"#).unwrap(),
            html_tags: Regex::new(r"<.*?>").unwrap(),
            zero_width: Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}]").unwrap(),
        }
    }
}

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Run the sanitization pipeline over a string
pub fn sanitize_str(input: &str) -> String {
    let patterns = &*PATTERNS;

    let text = input.trim_matches(is_trimmed);
    let text = patterns.script_tags.replace_all(text, "");
    let text = patterns.event_handlers.replace_all(&text, "");
    let text = patterns.js_protocol.replace_all(&text, "");
    let text = patterns.sql_meta_chars.replace_all(&text, "");
    let text = patterns.html_tags.replace_all(&text, "");
    let text = patterns.zero_width.replace_all(&text, "");

    text.into_owned()
}

/// Sanitize a value; non-strings are returned unchanged
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(s)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_tags() {
        let result = sanitize_str(r#"<script>alert("xss")</script>hello"#);
        assert!(!result.contains("<script"));
        assert!(!result.contains("</script"));
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_script_tags_case_insensitive() {
        let result = sanitize_str("<SCRIPT type=text/javascript>steal()</ScRiPt>ok");
        assert_eq!(result, "ok");
    }

    #[test]
    fn test_removes_event_handlers() {
        let result = sanitize_str(r#"<div onclick="x()">hi</div>"#);
        assert!(!result.contains("onclick"));
        assert!(!result.contains("<div"));
        assert!(!result.contains("</div>"));
        assert_eq!(result, "hi");
    }

    #[test]
    fn test_removes_javascript_urls() {
        let result = sanitize_str(r#"<a href="JavaScript:alert('xss')">click me</a>"#);
        assert!(!result.to_lowercase().contains("javascript:"));
        assert_eq!(result, "click me");
    }

    #[test]
    fn test_removes_html_tags() {
        let result = sanitize_str("<p>Hello <strong>world</strong>!</p>");
        assert_eq!(result, "Hello world!");
    }

    #[test]
    fn test_strips_sql_meta_chars() {
        assert_eq!(sanitize_str("Robert'); DROP TABLE users;--"), "Robert) DROP TABLE users--");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_str("  hello world  "), "hello world");
        assert_eq!(sanitize_str("\u{FEFF}\t hello\n"), "hello");
    }

    #[test]
    fn test_removes_zero_width_chars() {
        assert_eq!(sanitize_str("pa\u{200B}y\u{200C}p\u{200D}al\u{FEFF}"), "paypal");
    }

    #[test]
    fn test_complex_xss() {
        let result =
            sanitize_str(r#"<img src="x" onerror="alert('xss')"><script>alert("xss")</script>"#);
        assert!(!result.contains("<img"));
        assert!(!result.contains("onerror"));
        assert!(!result.contains("<script>"));
        assert!(!result.contains("alert"));
    }

    #[test]
    fn test_encoded_payload_survives() {
        // entities are not decoded
        let result = sanitize_str("&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(result, "&ltscript&gtalert(1)&lt/script&gt");
    }

    #[test]
    fn test_whitespace_exposed_by_tag_removal_is_kept() {
        let once = sanitize_str("hello <br>");
        assert_eq!(once, "hello ");
        assert_eq!(sanitize_str(&once), "hello");
        assert_eq!(sanitize_str("  <i>x</i> ;"), "x ");
    }

    #[test]
    fn test_non_string_passthrough() {
        assert_eq!(sanitize(&Value::from(123)), Value::from(123));
        assert_eq!(sanitize(&Value::Null), Value::Null);
        assert_eq!(sanitize(&Value::from(true)), Value::from(true));
        let arr = Value::Array(vec![Value::from("<b>x</b>")]);
        assert_eq!(sanitize(&arr), arr);
    }
}
