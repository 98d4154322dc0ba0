//! Translate action test utilities.
//!
//! Record fixtures and stub translation providers for integration tests.
//! Every stub counts its calls so tests can assert the provider was (or was
//! not) contacted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use translate_action::{ProviderError, Record, TranslationOrchestrator, TranslationProvider};

/// A blog post with translatable `title` and `body` and a few plain fields.
pub fn test_post(title: &str, body: &str) -> Record {
    Record::new()
        .with_attribute("id", 42)
        .with_attribute("slug", "hello-world")
        .with_attribute("published", true)
        .with_attribute("title", title)
        .with_attribute("body", body)
        .with_translation("title", "en", title)
        .with_translation("body", "en", body)
}

/// Wrap a stub in an orchestrator, keeping a handle to inspect it.
pub fn orchestrator_with<P>(provider: P) -> (TranslationOrchestrator, Arc<P>)
where
    P: TranslationProvider + 'static,
{
    let provider = Arc::new(provider);
    (TranslationOrchestrator::new(provider.clone()), provider)
}

/// Returns every text unchanged.
#[derive(Debug, Default)]
pub struct EchoProvider {
    calls: AtomicUsize,
}

impl EchoProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for EchoProvider {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn translate_texts(
        &self,
        texts: &[String],
        _source_locale: &str,
        _target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.to_vec())
    }
}

/// Translates from a fixed dictionary; unknown texts pass through.
#[derive(Debug, Default)]
pub struct DictionaryProvider {
    entries: HashMap<String, String>,
    calls: AtomicUsize,
    last_batch: std::sync::Mutex<Vec<String>>,
}

impl DictionaryProvider {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts submitted by the most recent call.
    pub fn last_batch(&self) -> Vec<String> {
        self.last_batch
            .lock()
            .map(|batch| batch.to_vec())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranslationProvider for DictionaryProvider {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn translate_texts(
        &self,
        texts: &[String],
        _source_locale: &str,
        _target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut batch) = self.last_batch.lock() {
            *batch = texts.to_vec();
        }
        Ok(texts
            .iter()
            .map(|text| self.entries.get(text).cloned().unwrap_or_else(|| text.clone()))
            .collect())
    }
}

/// Always fails with the given error.
#[derive(Debug)]
pub struct FailingProvider {
    error: ProviderError,
    calls: AtomicUsize,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails with a non-2xx status.
    pub fn status(status: u16, reason: &str) -> Self {
        Self::new(ProviderError::Status {
            status,
            reason: reason.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn translate_texts(
        &self,
        _texts: &[String],
        _source_locale: &str,
        _target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Translates like [`DictionaryProvider`] but drops the last `missing` results.
#[derive(Debug)]
pub struct TruncatingProvider {
    inner: DictionaryProvider,
    missing: usize,
}

impl TruncatingProvider {
    pub fn new(entries: &[(&str, &str)], missing: usize) -> Self {
        Self {
            inner: DictionaryProvider::new(entries),
            missing,
        }
    }
}

#[async_trait]
impl TranslationProvider for TruncatingProvider {
    fn name(&self) -> &'static str {
        "truncating"
    }

    async fn translate_texts(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut translated = self
            .inner
            .translate_texts(texts, source_locale, target_locale)
            .await?;
        translated.truncate(translated.len().saturating_sub(self.missing));
        Ok(translated)
    }
}

/// Shorthand for a JSON attribute value in assertions.
pub fn text(value: &str) -> serde_json::Value {
    serde_json::Value::String(value.to_string())
}
