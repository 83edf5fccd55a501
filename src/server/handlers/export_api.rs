//! CSV download endpoint.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::super::AppState;
use crate::export;
use crate::session::StoreError;

/// Which slice of the walk to export.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportRange {
    /// Every record, unset labels included.
    #[default]
    Full,
    /// Only the labeled-so-far prefix.
    Partial,
}

/// Query params for export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub range: ExportRange,
}

/// Download a session's records and labels as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<ExportQuery>,
) -> Response {
    let stored = match state.store.load(&session_id) {
        Ok(stored) => stored,
        Err(StoreError::NotFound(_)) => {
            return (StatusCode::NOT_FOUND, "Session not found").into_response();
        }
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };
    let session = match stored.open() {
        Ok(session) => session,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let (view, suffix) = match params.range {
        ExportRange::Full => (session.export_full(), "labeled"),
        ExportRange::Partial => (session.export_partial(), "partial"),
    };
    let csv = export::to_csv(&view, &stored.text_column);

    let stem = stored.name.trim_end_matches(".csv");
    let filename = format!("{}-{}.csv", stem, suffix);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                urlencoding::encode(&filename)
            ),
        )
        .body(Body::from(csv))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
