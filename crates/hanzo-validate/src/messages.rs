//! Localized error messages
//!
//! Messages live in a static table, one row per locale. Unknown locales
//! resolve to [`DEFAULT_LOCALE`]. Adding a locale means adding a row.

/// Locale used when the requested one is not in the table
pub const DEFAULT_LOCALE: &str = "en";

/// Message templates for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleMessages {
    pub tag: &'static str,
    pub required: &'static str,
    /// Contains `{min}`
    pub min_length: &'static str,
    /// Contains `{max}`
    pub max_length: &'static str,
    /// Contains `{type}`
    pub type_mismatch: &'static str,
    pub regex: &'static str,
    pub email: &'static str,
}

static LOCALES: &[LocaleMessages] = &[
    LocaleMessages {
        tag: "en",
        required: "This field is required",
        min_length: "Must be at least {min} characters long",
        max_length: "Must be no more than {max} characters long",
        type_mismatch: "Must be a valid {type}",
        regex: "Invalid format",
        email: "Must be a valid email address",
    },
    LocaleMessages {
        tag: "es",
        required: "Este campo es obligatorio",
        min_length: "Debe tener al menos {min} caracteres",
        max_length: "No debe tener más de {max} caracteres",
        type_mismatch: "Debe ser un {type} válido",
        regex: "Formato inválido",
        email: "Debe ser un email válido",
    },
    LocaleMessages {
        tag: "fr",
        required: "Ce champ est obligatoire",
        min_length: "Doit contenir au moins {min} caractères",
        max_length: "Ne doit pas dépasser {max} caractères",
        type_mismatch: "Doit être un {type} valide",
        regex: "Format invalide",
        email: "Doit être un email valide",
    },
];

/// Tags of every locale in the table
pub fn supported_locales() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|row| row.tag)
}

/// Look up the message row for a locale, falling back to the default
pub fn locale_messages(locale: &str) -> &'static LocaleMessages {
    LOCALES
        .iter()
        .find(|row| row.tag == locale)
        .unwrap_or(&LOCALES[0])
}

/// Tag that will actually be used for a requested locale
pub fn resolve_locale(locale: &str) -> &'static str {
    locale_messages(locale).tag
}

/// Build the error message for a failed rule
///
/// `parameter` is the rule parameter in display form and only matters for
/// `minLength`, `maxLength` and `type`.
pub fn message(rule_name: &str, parameter: &str, locale: &str) -> String {
    let row = locale_messages(locale);
    match rule_name {
        "required" => row.required.to_string(),
        "minLength" => row.min_length.replacen("{min}", parameter, 1),
        "maxLength" => row.max_length.replacen("{max}", parameter, 1),
        "type" => row.type_mismatch.replacen("{type}", parameter, 1),
        "regex" => row.regex.to_string(),
        "email" => row.email.to_string(),
        _ => format!("Validation failed for rule: {}", rule_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row_is_first() {
        assert_eq!(LOCALES[0].tag, DEFAULT_LOCALE);
    }

    #[test]
    fn test_placeholders_substituted() {
        assert_eq!(message("minLength", "3", "en"), "Must be at least 3 characters long");
        assert_eq!(message("maxLength", "10", "es"), "No debe tener más de 10 caracteres");
        assert_eq!(message("type", "number", "fr"), "Doit être un number valide");
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(message("required", "true", "fr"), "Ce champ est obligatoire");
        assert_eq!(message("regex", "^a$", "es"), "Formato inválido");
        assert_eq!(message("email", "", "en"), "Must be a valid email address");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(message("required", "true", "xx"), message("required", "true", "en"));
        assert_eq!(resolve_locale("de"), "en");
        assert_eq!(resolve_locale("es"), "es");
    }

    #[test]
    fn test_unknown_rule_fallback() {
        for locale in supported_locales() {
            assert_eq!(
                message("sanitize", "true", locale),
                "Validation failed for rule: sanitize"
            );
        }
    }

    #[test]
    fn test_every_row_has_placeholders() {
        for row in LOCALES {
            assert!(row.min_length.contains("{min}"), "{}", row.tag);
            assert!(row.max_length.contains("{max}"), "{}", row.tag);
            assert!(row.type_mismatch.contains("{type}"), "{}", row.tag);
        }
    }
}
