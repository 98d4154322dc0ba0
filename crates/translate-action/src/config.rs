//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Locale records are translated from (default: "en").
    pub source_locale: String,

    /// Translation provider settings.
    pub provider: ProviderConfig,
}

/// Translation provider settings.
#[derive(Clone)]
pub struct ProviderConfig {
    /// DeepL authentication key. Never logged.
    pub api_key: String,

    /// Explicit translate endpoint. When None, derived from the key type.
    pub endpoint: Option<String>,

    /// DeepL formality ("more", "less", "prefer_more", "prefer_less").
    pub formality: Option<String>,

    /// DeepL model selection ("quality_optimized", "latency_optimized", ...).
    pub model_type: Option<String>,

    /// DeepL tag handling ("html" or "xml") for rich text fields.
    pub tag_handling: Option<String>,

    /// Request timeout (default: 30s).
    pub timeout: Duration,

    /// Honour HTTP(S)_PROXY environment variables (default: true).
    pub system_proxy: bool,
}

impl ProviderConfig {
    /// Create a provider config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            formality: None,
            model_type: None,
            tag_handling: None,
            timeout: Duration::from_secs(30),
            system_proxy: true,
        }
    }

    /// Override the translate endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect directly, ignoring proxy environment variables.
    pub fn without_system_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("formality", &self.formality)
            .field("model_type", &self.model_type)
            .field("tag_handling", &self.tag_handling)
            .field("timeout", &self.timeout)
            .field("system_proxy", &self.system_proxy)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let source_locale = lookup("TRANSLATE_SOURCE_LOCALE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "en".to_string());

        let api_key = lookup("DEEPL_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .context("DEEPL_API_KEY environment variable is required")?;

        let timeout_secs: u64 = lookup("TRANSLATE_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("TRANSLATE_TIMEOUT_SECS must be a whole number of seconds")?;

        let optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = ProviderConfig {
            api_key,
            endpoint: optional("DEEPL_API_URL"),
            formality: optional("DEEPL_FORMALITY"),
            model_type: optional("DEEPL_MODEL_TYPE"),
            tag_handling: optional("DEEPL_TAG_HANDLING"),
            timeout: Duration::from_secs(timeout_secs),
            system_proxy: true,
        };

        Ok(Self {
            port,
            source_locale,
            provider,
        })
    }
}
