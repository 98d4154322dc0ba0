#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Translate action tests: visibility and form-fill outcomes.

use serde_json::Value;
use translate_action::{ActionOutcome, Record, TranslateAction};
use translate_action_test_utils::{DictionaryProvider, EchoProvider, orchestrator_with, text};

#[tokio::test]
async fn changed_fields_skip_fields_without_source_text() {
    let (orchestrator, _provider) =
        orchestrator_with(DictionaryProvider::new(&[("Hello", "Bonjour")]));
    let action = TranslateAction::new(orchestrator).source_locale("en");
    let record = Record::new()
        .with_attribute("title", "Hello")
        .with_translation("title", "en", "Hello")
        .with_attribute("subtitle", Value::Null)
        .translatable("subtitle");

    let outcome = action.run(&record, "fr", "en").await;

    let ActionOutcome::Filled {
        attributes,
        changed_fields,
        notification,
    } = outcome
    else {
        panic!("expected a filled form, got {outcome:?}");
    };
    assert_eq!(attributes["title"], text("Bonjour"));
    assert_eq!(attributes["subtitle"], Value::Null);
    assert_eq!(changed_fields, 1);
    assert_eq!(notification.body, "1 fields were translated.");
}

#[tokio::test]
async fn identity_provider_reports_no_changes() {
    let (orchestrator, _provider) = orchestrator_with(EchoProvider::default());
    let action = TranslateAction::new(orchestrator);
    let record = Record::new()
        .with_attribute("title", "Hello")
        .with_translation("title", "en", "Hello")
        .with_attribute("rank", 7)
        .translatable("rank");

    let outcome = action.run(&record, "de", "en").await;

    assert!(matches!(outcome, ActionOutcome::Filled { changed_fields: 0, .. }));
}

#[test]
fn hidden_for_any_spelling_of_source_locale() {
    let (orchestrator, _provider) = orchestrator_with(EchoProvider::default());
    let action = TranslateAction::new(orchestrator).source_locale("en_US");

    assert!(action.is_hidden("en_US"));
    assert!(action.is_hidden("EN-us"));
    assert!(!action.is_hidden("en"));
    assert!(!action.is_hidden("fr"));
}
