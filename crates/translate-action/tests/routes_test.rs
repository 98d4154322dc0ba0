#![allow(clippy::unwrap_used, clippy::expect_used)]
//! HTTP binding tests using the real router and stub providers.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use translate_action::{AppState, TranslateAction, TranslationProvider, routes};
use translate_action_test_utils::{DictionaryProvider, FailingProvider, orchestrator_with};

fn app_with<P>(provider: P) -> Router
where
    P: TranslationProvider + 'static,
{
    let (orchestrator, _provider) = orchestrator_with(provider);
    let action = TranslateAction::new(orchestrator).source_locale("en");
    routes::app(AppState::from_action(action))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

fn run_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/actions/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_record() -> Value {
    json!({
        "attributes": {"id": 1, "title": "Hello", "body": "Same"},
        "translatable": ["title", "body"],
        "translations": {
            "title": {"en": "Hello"},
            "body": {"en": "Same"}
        }
    })
}

#[tokio::test]
async fn health_reports_provider() {
    let app = app_with(DictionaryProvider::new(&[]));

    let (status, body) = send(
        app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "provider": "dictionary"}));
}

#[tokio::test]
async fn descriptor_is_hidden_on_source_locale() {
    let app = app_with(DictionaryProvider::new(&[]));

    let (status, body) = send(
        app.clone(),
        Request::builder()
            .uri("/actions/translate?active_locale=en")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hidden"], true);
    assert_eq!(body["name"], "translate");
    assert_eq!(body["icon"], "heroicon-o-language");
    assert_eq!(body["requires_confirmation"], true);

    let (_, body) = send(
        app,
        Request::builder()
            .uri("/actions/translate?active_locale=fr&ui_locale=de")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["hidden"], false);
    assert_eq!(body["label"], "Übersetzen");
}

#[tokio::test]
async fn run_fills_form_and_counts_changed_fields() {
    let app = app_with(DictionaryProvider::new(&[("Hello", "Bonjour")]));

    let (status, body) = send(
        app,
        run_request(json!({
            "record": post_record(),
            "active_locale": "fr",
            "confirmed": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "filled");
    assert_eq!(
        body["attributes"],
        json!({"id": 1, "title": "Bonjour", "body": "Same"})
    );
    // "Same" translated to itself, so only the title changed.
    assert_eq!(body["changed_fields"], 1);
    assert_eq!(body["notification"]["status"], "success");
    assert_eq!(body["notification"]["body"], "1 fields were translated.");
}

#[tokio::test]
async fn run_failure_returns_notification() {
    let app = app_with(FailingProvider::status(456, "Quota exceeded"));

    let (status, body) = send(
        app,
        run_request(json!({
            "record": post_record(),
            "active_locale": "fr",
            "ui_locale": "de",
            "confirmed": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["outcome"], "failed");
    assert_eq!(body["failure"]["kind"], "quota_or_billing_error");
    assert_eq!(body["notification"]["status"], "danger");
    assert_eq!(body["notification"]["title"], "Übersetzung fehlgeschlagen");
    assert!(body.get("attributes").is_none());
}

#[tokio::test]
async fn run_requires_confirmation() {
    let app = app_with(DictionaryProvider::new(&[]));

    let (status, body) = send(
        app,
        run_request(json!({"record": post_record(), "active_locale": "fr"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("confirmation"));
}

#[tokio::test]
async fn run_rejected_on_source_locale() {
    let app = app_with(DictionaryProvider::new(&[]));

    let (status, body) = send(
        app,
        run_request(json!({
            "record": post_record(),
            "active_locale": "en",
            "confirmed": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("not available"));
}

#[tokio::test]
async fn run_rejected_on_differently_spelled_source_locale() {
    let app = app_with(FailingProvider::status(500, "Internal Server Error"));

    let (status, _) = send(
        app,
        run_request(json!({
            "record": post_record(),
            "active_locale": "EN",
            "confirmed": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_rejects_blank_locale() {
    let app = app_with(DictionaryProvider::new(&[]));

    let (status, _) = send(
        app,
        run_request(json!({
            "record": post_record(),
            "active_locale": "  ",
            "confirmed": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
