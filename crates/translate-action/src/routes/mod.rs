//! HTTP routes.

pub mod health;
pub mod translate;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(translate::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
