//! Translate action library.
//!
//! Machine-translates the translatable fields of a record into the locale an
//! edit form is showing, and reports the outcome as a form fill plus a
//! notification. The `translate-action` binary serves this over HTTP.

pub mod action;
pub mod config;
pub mod error;
pub mod failure;
pub mod locale;
pub mod notification;
pub mod provider;
pub mod record;
pub mod routes;
pub mod services;
pub mod state;

pub use action::{ActionOutcome, TranslateAction};
pub use config::{Config, ProviderConfig};
pub use failure::TranslationFailure;
pub use provider::{DeepLProvider, ProviderError, TranslationProvider};
pub use record::{AttributeMap, Record, Translatable};
pub use services::TranslationOrchestrator;
pub use state::AppState;
