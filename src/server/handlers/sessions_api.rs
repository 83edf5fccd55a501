//! JSON API for session state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::super::AppState;
use crate::session::{StoreError, StoredSession};

/// Session summary as exposed over the API.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub labeled: usize,
    pub cursor: usize,
    pub complete: bool,
    pub label_set: String,
    pub allow_backward: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionSummary {
    fn from_stored(stored: &StoredSession) -> Self {
        Self {
            id: stored.id.clone(),
            name: stored.name.clone(),
            total: stored.records.len(),
            labeled: stored.labeled_count(),
            cursor: stored.cursor,
            complete: stored.is_complete(),
            label_set: stored.options.label_set.as_str().to_string(),
            allow_backward: stored.options.allow_backward,
            created_at: stored.created_at.to_rfc3339(),
            updated_at: stored.updated_at.to_rfc3339(),
        }
    }
}

/// List all sessions.
pub async fn api_sessions(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list() {
        Ok(sessions) => {
            let summaries: Vec<SessionSummary> =
                sessions.iter().map(SessionSummary::from_stored).collect();
            Json(summaries).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// One session's summary.
pub async fn api_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.load(&session_id) {
        Ok(stored) => Json(SessionSummary::from_stored(&stored)).into_response(),
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "session not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
