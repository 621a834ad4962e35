use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use super::forms;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create a minimal router without state
/// Note: /ready and the form endpoints are not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Login, registration and profile update forms
        .nest("/forms", forms::create_forms_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
