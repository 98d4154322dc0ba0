//! Localized toast notifications for the translate action.
//!
//! Messages live in a static catalog keyed by locale and dotted key.
//! Lookups fall back to English, then to the key itself.

use serde::Serialize;

use crate::failure::TranslationFailure;

/// Locale used when a message is missing in the requested locale.
pub const FALLBACK_LOCALE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("label", "Translate"),
    ("modal.heading", "Translate record"),
    (
        "modal.description",
        "Current field values will be replaced with machine translations. Unsaved changes are kept until you save.",
    ),
    ("notifications.success.title", "Translation successful"),
    ("notifications.success.body", ":fields fields were translated."),
    ("notifications.error.title", "Translation failed"),
    ("notifications.error.body", "The translation service responded with: :reason"),
    (
        "notifications.connection-error",
        "Could not connect to the translation service. Please try again later.",
    ),
    (
        "notifications.429-error",
        "Too many requests were sent to the translation service. Please wait a moment and try again.",
    ),
    (
        "notifications.456-error",
        "The translation quota has been exceeded. Please check your translation service account.",
    ),
    (
        "notifications.malformed-response",
        "The translation service returned an incomplete response. No fields were changed.",
    ),
];

const DE: &[(&str, &str)] = &[
    ("label", "Übersetzen"),
    ("modal.heading", "Datensatz übersetzen"),
    (
        "modal.description",
        "Die aktuellen Feldwerte werden durch maschinelle Übersetzungen ersetzt. Ungespeicherte Änderungen bleiben bis zum Speichern erhalten.",
    ),
    ("notifications.success.title", "Übersetzung erfolgreich"),
    ("notifications.success.body", ":fields Felder wurden übersetzt."),
    ("notifications.error.title", "Übersetzung fehlgeschlagen"),
    ("notifications.error.body", "Der Übersetzungsdienst antwortete mit: :reason"),
    (
        "notifications.connection-error",
        "Keine Verbindung zum Übersetzungsdienst. Bitte später erneut versuchen.",
    ),
    (
        "notifications.429-error",
        "Zu viele Anfragen an den Übersetzungsdienst. Bitte kurz warten und erneut versuchen.",
    ),
    (
        "notifications.456-error",
        "Das Übersetzungskontingent ist aufgebraucht. Bitte das Konto beim Übersetzungsdienst prüfen.",
    ),
    (
        "notifications.malformed-response",
        "Der Übersetzungsdienst lieferte eine unvollständige Antwort. Es wurden keine Felder geändert.",
    ),
];

const CATALOG: &[(&str, &[(&str, &str)])] = &[("en", EN), ("de", DE)];

/// Static message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages;

impl Messages {
    /// Look up `key` for `locale`.
    ///
    /// Regional locales ("de-AT", "de_CH") resolve to their primary language.
    pub fn get(locale: &str, key: &str) -> String {
        let primary = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(FALLBACK_LOCALE)
            .to_lowercase();

        lookup(&primary, key)
            .or_else(|| lookup(FALLBACK_LOCALE, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Look up `key` and substitute `:name` placeholders.
    pub fn format(locale: &str, key: &str, replacements: &[(&str, String)]) -> String {
        let mut message = Self::get(locale, key);
        for (name, value) in replacements {
            message = message.replace(&format!(":{name}"), value);
        }
        message
    }
}

fn lookup(locale: &str, key: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(code, _)| *code == locale)
        .and_then(|(_, table)| table.iter().find(|(k, _)| *k == key))
        .map(|(_, message)| *message)
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Success,
    Danger,
}

/// A toast shown after the action ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub status: NotificationStatus,
}

impl Notification {
    /// Success toast reporting how many fields changed.
    pub fn success(changed_fields: usize, locale: &str) -> Self {
        Self {
            title: Messages::get(locale, "notifications.success.title"),
            body: Messages::format(
                locale,
                "notifications.success.body",
                &[("fields", changed_fields.to_string())],
            ),
            status: NotificationStatus::Success,
        }
    }

    /// Error toast describing `failure`.
    pub fn failure(failure: &TranslationFailure, locale: &str) -> Self {
        let body = match failure {
            TranslationFailure::ConnectionFailure { .. } => {
                Messages::get(locale, "notifications.connection-error")
            }
            TranslationFailure::RateLimited => Messages::get(locale, "notifications.429-error"),
            TranslationFailure::QuotaOrBillingError => {
                Messages::get(locale, "notifications.456-error")
            }
            TranslationFailure::GenericProviderError { reason, .. } => Messages::format(
                locale,
                "notifications.error.body",
                &[("reason", reason.clone())],
            ),
            TranslationFailure::MalformedResponse { .. } => {
                Messages::get(locale, "notifications.malformed-response")
            }
        };

        Self {
            title: Messages::get(locale, "notifications.error.title"),
            body,
            status: NotificationStatus::Danger,
        }
    }
}
