//! DeepL translation provider.
//!
//! Sends every field of a record in one `POST /v2/translate` call and
//! returns the translations in request order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ProviderError, TranslationProvider};
use crate::config::ProviderConfig;

/// Endpoint for free-tier keys (suffix `:fx`).
const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// Endpoint for paid keys.
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

/// Target used for a bare "en" locale.
const DEFAULT_ENGLISH_TARGET: &str = "EN-US";

/// Target used for a bare "pt" locale.
const DEFAULT_PORTUGUESE_TARGET: &str = "PT-PT";

/// Longest provider body echoed into a reason phrase.
const MAX_REASON_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    source_lang: String,
    target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_handling: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// DeepL API client.
#[derive(Clone)]
pub struct DeepLProvider {
    client: reqwest::Client,
    endpoint: url::Url,
    api_key: String,
    formality: Option<String>,
    model_type: Option<String>,
    tag_handling: Option<String>,
}

impl DeepLProvider {
    /// Build a provider from configuration.
    ///
    /// Fails when the API key is empty or the endpoint is not a valid URL.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("DeepL API key must not be empty");
        }

        let endpoint = config
            .endpoint
            .as_deref()
            .unwrap_or_else(|| default_endpoint(&config.api_key));
        let endpoint = url::Url::parse(endpoint)
            .with_context(|| format!("invalid DeepL endpoint '{endpoint}'"))?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("translate-action/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            formality: config.formality.clone(),
            model_type: config.model_type.clone(),
            tag_handling: config.tag_handling.clone(),
        })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    fn request_body<'a>(
        &'a self,
        texts: &'a [String],
        source_locale: &str,
        target_locale: &str,
    ) -> TranslateRequest<'a> {
        TranslateRequest {
            text: texts,
            source_lang: source_lang(source_locale),
            target_lang: target_lang(target_locale),
            formality: self.formality.as_deref(),
            model_type: self.model_type.as_deref(),
            tag_handling: self.tag_handling.as_deref(),
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate_texts(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let body = self.request_body(texts, source_locale, target_locale);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "DeepL request failed");
                ProviderError::Connection(e.to_string())
            })?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        if !status.is_success() {
            let reason = reason_phrase(status, &payload);
            warn!(status = status.as_u16(), reason = %reason, "DeepL rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let decoded: TranslateResponse = serde_json::from_str(&payload)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(detected) = decoded
            .translations
            .first()
            .and_then(|t| t.detected_source_language.as_deref())
        {
            debug!(
                detected = %detected,
                count = decoded.translations.len(),
                "DeepL translated batch"
            );
        }

        Ok(decoded.translations.into_iter().map(|t| t.text).collect())
    }
}

impl std::fmt::Debug for DeepLProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLProvider")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Free keys carry a `:fx` suffix and must use the free endpoint.
fn default_endpoint(api_key: &str) -> &'static str {
    if api_key.trim_end().ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

/// DeepL source languages never carry a region ("en-US" -> "EN").
fn source_lang(locale: &str) -> String {
    let normalized = normalize_locale(locale);
    match normalized.split_once('-') {
        Some((primary, _)) => primary.to_string(),
        None => normalized,
    }
}

/// Target languages keep their region ("pt_br" -> "PT-BR").
///
/// DeepL rejects bare "EN" and "PT" as targets, so those get a default region.
fn target_lang(locale: &str) -> String {
    let normalized = normalize_locale(locale);
    match normalized.as_str() {
        "EN" => DEFAULT_ENGLISH_TARGET.to_string(),
        "PT" => DEFAULT_PORTUGUESE_TARGET.to_string(),
        _ => normalized,
    }
}

fn normalize_locale(locale: &str) -> String {
    crate::locale::normalize(locale).to_uppercase()
}

/// Human-readable reason for a non-2xx status.
fn reason_phrase(status: reqwest::StatusCode, body: &str) -> String {
    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }

    if let Ok(error) = serde_json::from_str::<ErrorBody>(body)
        && !error.message.trim().is_empty()
    {
        return error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        return "Unknown error".to_string();
    }

    let mut cut = body.len().min(MAX_REASON_LEN);
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    body[..cut].to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn free_keys_use_free_endpoint() {
        assert_eq!(default_endpoint("abc:fx"), FREE_ENDPOINT);
        assert_eq!(default_endpoint("abc"), PRO_ENDPOINT);
    }

    #[test]
    fn explicit_endpoint_overrides_default() {
        let config = ProviderConfig::new("abc:fx").with_endpoint("http://127.0.0.1:9/v2/translate");
        let provider = DeepLProvider::new(&config).unwrap();
        assert_eq!(provider.endpoint().as_str(), "http://127.0.0.1:9/v2/translate");
    }

    #[test]
    fn rejects_empty_key_and_bad_endpoint() {
        assert!(DeepLProvider::new(&ProviderConfig::new("  ")).is_err());
        assert!(DeepLProvider::new(&ProviderConfig::new("k").with_endpoint("not a url")).is_err());
    }

    #[test]
    fn locale_normalization() {
        assert_eq!(source_lang("en"), "EN");
        assert_eq!(source_lang("en_US"), "EN");
        assert_eq!(source_lang("pt-br"), "PT");
        assert_eq!(target_lang("pt_br"), "PT-BR");
        assert_eq!(target_lang("fr"), "FR");
    }

    #[test]
    fn bare_english_and_portuguese_targets_get_a_region() {
        assert_eq!(target_lang("en"), "EN-US");
        assert_eq!(target_lang("EN"), "EN-US");
        assert_eq!(target_lang("en_GB"), "EN-GB");
        assert_eq!(target_lang("pt"), "PT-PT");
        assert_eq!(target_lang("pt-BR"), "PT-BR");
        assert_eq!(source_lang("en"), "EN");
    }

    #[test]
    fn request_body_shape() {
        let mut config = ProviderConfig::new("k");
        config.formality = Some("less".to_string());
        let provider = DeepLProvider::new(&config).unwrap();
        let texts = vec!["Hello".to_string(), "World".to_string()];

        let body = serde_json::to_value(provider.request_body(&texts, "en", "de")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "text": ["Hello", "World"],
                "source_lang": "EN",
                "target_lang": "DE",
                "formality": "less",
            })
        );
    }

    #[test]
    fn reason_prefers_canonical_phrase() {
        let status = reqwest::StatusCode::TOO_MANY_REQUESTS;
        assert_eq!(reason_phrase(status, "{}"), "Too Many Requests");
    }

    #[test]
    fn reason_uses_provider_message_for_nonstandard_status() {
        let status = reqwest::StatusCode::from_u16(456).unwrap();
        assert_eq!(
            reason_phrase(status, r#"{"message":"Quota exceeded"}"#),
            "Quota exceeded"
        );
        assert_eq!(reason_phrase(status, ""), "Unknown error");
    }

    #[test]
    fn reason_truncates_long_bodies_on_char_boundary() {
        let status = reqwest::StatusCode::from_u16(499).unwrap();
        let body = "é".repeat(300);
        let reason = reason_phrase(status, &body);
        assert!(reason.len() <= MAX_REASON_LEN);
        assert!(reason.chars().all(|c| c == 'é'));
    }
}
