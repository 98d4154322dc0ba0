//! Why a translation attempt failed.
//!
//! Every provider problem is folded into one [`TranslationFailure`] at the
//! orchestrator boundary. The UI only ever sees this type.

use serde::Serialize;
use thiserror::Error;

use crate::provider::ProviderError;

/// HTTP status DeepL uses for an exhausted character quota.
pub const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// HTTP status for provider throttling.
pub const RATE_LIMITED_STATUS: u16 = 429;

/// Terminal failure of a translate invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationFailure {
    /// Provider unreachable (DNS, TCP, TLS, timeout).
    #[error("translation provider unreachable: {details}")]
    ConnectionFailure { details: String },

    /// Provider throttled the request (HTTP 429).
    #[error("translation provider rate limit reached")]
    RateLimited,

    /// Account quota or billing problem (HTTP 456).
    #[error("translation quota exceeded")]
    QuotaOrBillingError,

    /// Any other non-2xx response.
    #[error("translation provider error {status}: {reason}")]
    GenericProviderError { status: u16, reason: String },

    /// Provider output does not line up with the request.
    #[error("malformed translation response: {details}")]
    MalformedResponse { details: String },
}

impl TranslationFailure {
    /// Classify a non-2xx provider status.
    pub fn from_status(status: u16, reason: impl Into<String>) -> Self {
        match status {
            RATE_LIMITED_STATUS => Self::RateLimited,
            QUOTA_EXCEEDED_STATUS => Self::QuotaOrBillingError,
            _ => Self::GenericProviderError {
                status,
                reason: reason.into(),
            },
        }
    }

    /// Failure for a translation count that differs from the request.
    pub fn count_mismatch(expected: usize, received: usize) -> Self {
        Self::MalformedResponse {
            details: format!("expected {expected} translations, received {received}"),
        }
    }
}

impl From<ProviderError> for TranslationFailure {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Connection(details) => Self::ConnectionFailure { details },
            ProviderError::Status { status, reason } => Self::from_status(status, reason),
            ProviderError::InvalidResponse(details) => Self::MalformedResponse { details },
        }
    }
}
