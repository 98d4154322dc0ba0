//! Translate action endpoints.
//!
//! `GET` describes the action for the current form locale; `POST` runs it
//! against the record currently open in the form.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::action::{ActionDescriptor, ActionOutcome};
use crate::error::{AppError, AppResult};
use crate::notification::FALLBACK_LOCALE;
use crate::record::Record;
use crate::state::AppState;

/// Query for the action descriptor.
#[derive(Debug, Deserialize)]
pub struct DescribeQuery {
    pub active_locale: String,
    pub ui_locale: Option<String>,
}

/// Request to run the action.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub record: Record,
    pub active_locale: String,
    pub ui_locale: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}

async fn describe(
    State(state): State<AppState>,
    Query(query): Query<DescribeQuery>,
) -> Json<ActionDescriptor> {
    let ui_locale = query.ui_locale.as_deref().unwrap_or(FALLBACK_LOCALE);
    Json(state.action().descriptor(&query.active_locale, ui_locale))
}

async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> AppResult<(StatusCode, Json<ActionOutcome>)> {
    let action = state.action();
    let active_locale = request.active_locale.trim();

    if active_locale.is_empty() {
        return Err(AppError::BadRequest("active_locale must not be empty".to_string()));
    }

    if !request.confirmed {
        return Err(AppError::BadRequest(
            "translate action requires confirmation".to_string(),
        ));
    }

    if action.is_hidden(active_locale) {
        return Err(AppError::ActionHidden {
            action: action.get_name().to_string(),
            locale: active_locale.to_string(),
        });
    }

    let ui_locale = request.ui_locale.as_deref().unwrap_or(FALLBACK_LOCALE);
    let outcome = action.run(&request.record, active_locale, ui_locale).await;

    let status = if outcome.is_filled() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Json(outcome)))
}

/// Create the translate action router.
pub fn router() -> Router<AppState> {
    Router::new().route("/actions/translate", get(describe).post(run))
}
