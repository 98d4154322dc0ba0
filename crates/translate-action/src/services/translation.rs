//! Record translation service.
//!
//! Reads a record's translatable fields in the source locale, sends them to
//! the provider as one batch, and overlays the results onto a copy of the
//! record's attributes. Nothing is persisted here.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::failure::TranslationFailure;
use crate::locale;
use crate::provider::TranslationProvider;
use crate::record::{AttributeMap, Translatable};

/// Translates records through an injected provider.
#[derive(Clone)]
pub struct TranslationOrchestrator {
    provider: Arc<dyn TranslationProvider>,
}

impl TranslationOrchestrator {
    /// Create an orchestrator around a long-lived provider.
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Translate `record` from `source_locale` to `target_locale`.
    ///
    /// Returns the record's attributes with every translatable field replaced
    /// by its translation. Non-translatable attributes pass through untouched,
    /// as do translatable fields with no source text. Either all fields are
    /// merged or none are.
    pub async fn translate<R>(
        &self,
        record: &R,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<AttributeMap, TranslationFailure>
    where
        R: Translatable + ?Sized,
    {
        let mut attributes = record.attributes();
        let fields = record.translatable_attributes();

        if fields.is_empty() {
            debug!("record has no translatable attributes");
            return Ok(attributes);
        }

        let sources: Vec<(String, String)> = fields
            .into_iter()
            .map(|field| {
                let text = record.source_text(&field, source_locale);
                (field, text)
            })
            .collect();

        // Fields without source text have nothing to translate. They keep
        // their current value; only missing keys are filled with "".
        let (pending, empty): (Vec<_>, Vec<_>) =
            sources.into_iter().partition(|(_, text)| !text.is_empty());

        for (field, _) in empty {
            attributes
                .entry(field)
                .or_insert_with(|| serde_json::Value::String(String::new()));
        }

        if locale::same_locale(source_locale, target_locale) {
            debug!(locale = %source_locale, "source and target locale match; skipping provider");
            return Ok(overlay_fields(attributes, pending));
        }

        if pending.is_empty() {
            return Ok(attributes);
        }

        let texts: Vec<String> = pending.iter().map(|(_, text)| text.clone()).collect();

        let translated = self
            .provider
            .translate_texts(&texts, source_locale, target_locale)
            .await
            .map_err(|e| {
                warn!(
                    provider = self.provider.name(),
                    source = %source_locale,
                    target = %target_locale,
                    error = %e,
                    "translation provider call failed"
                );
                TranslationFailure::from(e)
            })?;

        if translated.len() != texts.len() {
            warn!(
                provider = self.provider.name(),
                expected = texts.len(),
                received = translated.len(),
                "translation count mismatch; discarding response"
            );
            return Err(TranslationFailure::count_mismatch(
                texts.len(),
                translated.len(),
            ));
        }

        let merged = pending
            .into_iter()
            .zip(translated)
            .map(|((field, _), text)| (field, text));

        info!(
            provider = self.provider.name(),
            source = %source_locale,
            target = %target_locale,
            fields = texts.len(),
            "translated record"
        );

        Ok(overlay_fields(attributes, merged))
    }
}

impl std::fmt::Debug for TranslationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationOrchestrator")
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Overlay field texts onto a base attribute map.
fn overlay_fields(
    mut base: AttributeMap,
    fields: impl IntoIterator<Item = (String, String)>,
) -> AttributeMap {
    for (field, text) in fields {
        base.insert(field, serde_json::Value::String(text));
    }
    base
}

/// Count attributes whose value differs between `before` and `after`.
///
/// Keys present on only one side count as changed.
pub fn changed_attribute_count(before: &AttributeMap, after: &AttributeMap) -> usize {
    let changed = after
        .iter()
        .filter(|(key, value)| before.get(*key) != Some(*value))
        .count();
    let removed = before.keys().filter(|key| !after.contains_key(*key)).count();
    changed + removed
}
