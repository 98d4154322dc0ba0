//! Translatable records.
//!
//! A record is a flat attribute map where some attributes are translatable
//! and keep one value per locale. Persistence identity lives elsewhere; this
//! module only reads and copies values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute name to value, as handed to a form fill.
pub type AttributeMap = serde_json::Map<String, Value>;

/// Anything the translate action can read translatable fields from.
pub trait Translatable {
    /// Full snapshot of the record's current attribute values.
    fn attributes(&self) -> AttributeMap;

    /// Names of the translatable attributes, in submission order.
    fn translatable_attributes(&self) -> Vec<String>;

    /// Stored value of `field` for `locale`, if one exists.
    fn get_translation(&self, field: &str, locale: &str) -> Option<String>;

    /// Text to translate for `field`.
    ///
    /// Prefers the stored `locale` value and falls back to the current
    /// attribute value when it is a string. Anything else reads as empty.
    fn source_text(&self, field: &str, locale: &str) -> String {
        if let Some(text) = self.get_translation(field, locale) {
            return text;
        }

        match self.attributes().get(field) {
            Some(Value::String(text)) => text.clone(),
            _ => String::new(),
        }
    }
}

/// In-memory record with per-locale storage for its translatable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Current attribute values (the form state).
    #[serde(default)]
    pub attributes: AttributeMap,

    /// Translatable attribute names.
    #[serde(default)]
    pub translatable: Vec<String>,

    /// Stored translations: field -> locale -> text.
    #[serde(default)]
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain attribute value.
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Store a translation and mark the field translatable.
    pub fn with_translation(mut self, field: &str, locale: &str, text: &str) -> Self {
        self.mark_translatable(field);
        self.translations
            .entry(field.to_string())
            .or_default()
            .insert(locale.to_string(), text.to_string());
        self
    }

    /// Mark a field translatable without storing any translation.
    pub fn translatable(mut self, field: &str) -> Self {
        self.mark_translatable(field);
        self
    }

    fn mark_translatable(&mut self, field: &str) {
        if !self.translatable.iter().any(|f| f == field) {
            self.translatable.push(field.to_string());
        }
    }
}

impl Translatable for Record {
    fn attributes(&self) -> AttributeMap {
        self.attributes.clone()
    }

    fn translatable_attributes(&self) -> Vec<String> {
        self.translatable.clone()
    }

    fn get_translation(&self, field: &str, locale: &str) -> Option<String> {
        self.translations
            .get(field)
            .and_then(|by_locale| by_locale.get(locale))
            .cloned()
    }
}
