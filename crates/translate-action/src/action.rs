//! The admin "translate" action.
//!
//! Binds the translation service to an edit form: hidden while the form
//! shows the source locale, asks for confirmation, and on success hands back
//! the attributes to refill the form with.

use serde::Serialize;
use tracing::info;

use crate::failure::TranslationFailure;
use crate::locale;
use crate::notification::{Messages, Notification};
use crate::record::{AttributeMap, Translatable};
use crate::services::{TranslationOrchestrator, changed_attribute_count};

/// Default action name.
pub const DEFAULT_NAME: &str = "translate";

/// Icon shown on the action button.
pub const ICON: &str = "heroicon-o-language";

/// Serializable description of the action for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub name: String,
    pub label: String,
    pub icon: &'static str,
    pub requires_confirmation: bool,
    pub modal_heading: String,
    pub modal_description: String,
    pub source_locale: String,
    pub hidden: bool,
}

/// Result of running the action. Exactly one per invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Translation succeeded; refill the form with `attributes`.
    Filled {
        attributes: AttributeMap,
        changed_fields: usize,
        notification: Notification,
    },
    /// Translation failed; the form is left alone.
    Failed {
        failure: TranslationFailure,
        notification: Notification,
    },
}

impl ActionOutcome {
    /// The notification to show for this outcome.
    pub fn notification(&self) -> &Notification {
        match self {
            Self::Filled { notification, .. } | Self::Failed { notification, .. } => notification,
        }
    }

    /// Whether the translation succeeded.
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Translate action configured for one source locale.
#[derive(Debug, Clone)]
pub struct TranslateAction {
    name: String,
    source_locale: String,
    orchestrator: TranslationOrchestrator,
}

impl TranslateAction {
    /// Create the action with the default name and source locale "en".
    pub fn new(orchestrator: TranslationOrchestrator) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            source_locale: "en".to_string(),
            orchestrator,
        }
    }

    /// Set the locale records are translated from.
    pub fn source_locale(mut self, locale: impl Into<String>) -> Self {
        self.source_locale = locale.into();
        self
    }

    /// Rename the action.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Action name.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Configured source locale.
    pub fn get_source_locale(&self) -> &str {
        &self.source_locale
    }

    /// The translation service used by this action.
    pub fn orchestrator(&self) -> &TranslationOrchestrator {
        &self.orchestrator
    }

    /// The action is hidden while the form shows the source locale.
    ///
    /// Tags are compared after normalization, so "EN" and "en" match.
    pub fn is_hidden(&self, active_locale: &str) -> bool {
        locale::same_locale(active_locale, &self.source_locale)
    }

    /// Describe the action for a form in `active_locale`, labelled in `ui_locale`.
    pub fn descriptor(&self, active_locale: &str, ui_locale: &str) -> ActionDescriptor {
        ActionDescriptor {
            name: self.name.clone(),
            label: Messages::get(ui_locale, "label"),
            icon: ICON,
            requires_confirmation: true,
            modal_heading: Messages::get(ui_locale, "modal.heading"),
            modal_description: Messages::get(ui_locale, "modal.description"),
            source_locale: self.source_locale.clone(),
            hidden: self.is_hidden(active_locale),
        }
    }

    /// Translate `record` into `active_locale` and build the form-fill outcome.
    pub async fn run<R>(&self, record: &R, active_locale: &str, ui_locale: &str) -> ActionOutcome
    where
        R: Translatable + ?Sized,
    {
        let baseline = record.attributes();

        match self
            .orchestrator
            .translate(record, &self.source_locale, active_locale)
            .await
        {
            Ok(attributes) => {
                let changed_fields = changed_attribute_count(&baseline, &attributes);
                info!(
                    action = %self.name,
                    target = %active_locale,
                    changed_fields,
                    "translate action filled form"
                );
                ActionOutcome::Filled {
                    notification: Notification::success(changed_fields, ui_locale),
                    attributes,
                    changed_fields,
                }
            }
            Err(failure) => ActionOutcome::Failed {
                notification: Notification::failure(&failure, ui_locale),
                failure,
            },
        }
    }
}
