//! Locale tag handling.
//!
//! Records, forms and providers spell the same locale differently
//! ("en_US", "en-us", "EN-US"). Comparisons go through [`normalize`].

/// Canonical spelling of a locale tag: trimmed, hyphen separated, lowercase.
pub fn normalize(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}

/// Whether two locale tags name the same locale.
pub fn same_locale(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
