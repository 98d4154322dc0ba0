//! Translation provider seam.
//!
//! A provider turns a batch of source texts into translated texts in the
//! same order, in one round trip. Transport problems are reported as
//! [`ProviderError`] and mapped to user-facing failures by the orchestrator.

pub mod deepl;

use async_trait::async_trait;
use thiserror::Error;

pub use deepl::DeepLProvider;

/// Errors raised at the provider call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider could not be reached (DNS, TCP, TLS, timeout).
    #[error("could not connect to translation provider: {0}")]
    Connection(String),

    /// The provider answered with a non-2xx status.
    #[error("translation provider returned HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The provider answered 2xx but the body could not be decoded.
    #[error("invalid response from translation provider: {0}")]
    InvalidResponse(String),
}

/// External machine translation service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short provider name for logs and health output.
    fn name(&self) -> &'static str;

    /// Translate `texts` from `source_locale` to `target_locale`.
    ///
    /// Returns one translation per input text, in input order.
    async fn translate_texts(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError>;
}
