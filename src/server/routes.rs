//! Router configuration for the labeling server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Home: upload form + session list
        .route("/", get(handlers::home_page))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", get(handlers::annotate_page))
        .route("/sessions/:session_id/label", post(handlers::submit_label))
        .route("/sessions/:session_id/back", post(handlers::retreat_session))
        // CSV download
        .route("/sessions/:session_id/export.csv", get(handlers::export_csv))
        // Status API
        .route("/api/sessions", get(handlers::api_sessions))
        .route("/api/sessions/:session_id", get(handlers::api_session))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
