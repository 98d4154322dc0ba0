//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::action::TranslateAction;
use crate::config::Config;
use crate::provider::DeepLProvider;
use crate::services::TranslationOrchestrator;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    action: TranslateAction,
}

impl AppState {
    /// Build state with the DeepL provider described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let provider =
            DeepLProvider::new(&config.provider).context("failed to create DeepL provider")?;
        info!(endpoint = %provider.endpoint(), "DeepL provider ready");

        let action = TranslateAction::new(TranslationOrchestrator::new(Arc::new(provider)))
            .source_locale(config.source_locale.clone());

        Ok(Self::from_action(action))
    }

    /// Build state around an already configured action.
    pub fn from_action(action: TranslateAction) -> Self {
        Self {
            inner: Arc::new(AppStateInner { action }),
        }
    }

    /// The translate action.
    pub fn action(&self) -> &TranslateAction {
        &self.inner.action
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("action", &self.inner.action)
            .finish()
    }
}
