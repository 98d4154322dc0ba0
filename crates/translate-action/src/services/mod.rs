//! Services behind the translate action.

pub mod translation;

pub use translation::{TranslationOrchestrator, changed_attribute_count};
