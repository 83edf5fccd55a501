//! Page handlers: upload, the labeling walk, and navigation.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::super::templates;
use super::super::AppState;
use crate::ingest;
use crate::models::{Label, LabelSet};
use crate::session::{source_hash, StoreError};

/// Home page: upload form and session list.
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let sessions = match state.store.list() {
        Ok(sessions) => sessions,
        Err(e) => {
            return Html(templates::base_template(
                "Error",
                &format!("<p>Failed to list sessions: {}</p>", e),
            ));
        }
    };

    Html(templates::base_template(
        "CSV labeling",
        &templates::home(&sessions),
    ))
}

/// Create a session from an uploaded CSV, then redirect into the walk.
pub async fn create_session(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file_name = String::from("upload.csv");
    let mut content: Option<Vec<u8>> = None;
    let mut text_column = state.settings.text_column.clone();
    let mut options = state.settings.options;
    // Checkbox semantics: the field is only present when checked
    options.allow_backward = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return bad_request(format!("Malformed upload: {}", e));
            }
        };
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("file") => {
                if let Some(name) = field.file_name() {
                    if !name.trim().is_empty() {
                        file_name = name.to_string();
                    }
                }
                match field.bytes().await {
                    Ok(bytes) => content = Some(bytes.to_vec()),
                    Err(e) => return bad_request(format!("Failed to read upload: {}", e)),
                }
            }
            Some("text_column") => {
                if let Ok(value) = field.text().await {
                    if !value.trim().is_empty() {
                        text_column = value.trim().to_string();
                    }
                }
            }
            Some("label_set") => {
                if let Ok(value) = field.text().await {
                    if let Some(label_set) = LabelSet::from_str(&value) {
                        options.label_set = label_set;
                    }
                }
            }
            Some("allow_backward") => {
                options.allow_backward = true;
            }
            _ => {}
        }
    }

    let Some(content) = content else {
        return bad_request("No file in upload".to_string());
    };

    let records = match ingest::load_records(&content, &text_column) {
        Ok(records) => records,
        Err(e) => return bad_request(format!("Could not read CSV: {}", e)),
    };
    if records.is_empty() {
        return bad_request("CSV has a header but no data rows".to_string());
    }

    let hash = source_hash(&content);
    match state
        .store
        .create(&file_name, &hash, &text_column, records, options)
    {
        Ok(stored) => Redirect::to(&format!("/sessions/{}", stored.id)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to create session");
            server_error(format!("Failed to create session: {}", e))
        }
    }
}

/// The labeling page: current record with label choices, or the completion
/// view once the walk is done.
pub async fn annotate_page(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let stored = match state.store.load(&session_id) {
        Ok(stored) => stored,
        Err(e) => return store_error_page(&session_id, e),
    };
    let session = match stored.open() {
        Ok(session) => session,
        Err(e) => return server_error(format!("Corrupt session state: {}", e)),
    };

    let content = match session.current() {
        Some(record) => templates::annotate(
            &stored,
            record,
            session.label_at(record.position),
            session.options(),
        ),
        None => templates::complete(&stored),
    };

    Html(templates::base_template(&stored.name, &content)).into_response()
}

/// Form body for a label submission.
#[derive(Debug, Deserialize)]
pub struct LabelForm {
    pub label: String,
}

/// Label the current record and advance the cursor.
pub async fn submit_label(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Form(form): Form<LabelForm>,
) -> Response {
    let mut stored = match state.store.load(&session_id) {
        Ok(stored) => stored,
        Err(e) => return store_error_page(&session_id, e),
    };
    let mut session = match stored.open() {
        Ok(session) => session,
        Err(e) => return server_error(format!("Corrupt session state: {}", e)),
    };

    let Some(label) = Label::from_str(&form.label) else {
        return bad_request(format!("Unknown label '{}'", form.label));
    };

    if let Some(record) = session.current() {
        let position = record.position;
        if let Err(e) = session.label(position, label) {
            return bad_request(e.to_string());
        }
        session.advance();
        stored.absorb(&session);
        if let Err(e) = state.store.save(&stored) {
            tracing::error!(session = %session_id, error = %e, "failed to persist session");
            return server_error(format!("Failed to save progress: {}", e));
        }
    }
    // Labeling a completed walk is a no-op; the page shows the completion view

    Redirect::to(&format!("/sessions/{}", session_id)).into_response()
}

/// Step the cursor back one position.
pub async fn retreat_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let mut stored = match state.store.load(&session_id) {
        Ok(stored) => stored,
        Err(e) => return store_error_page(&session_id, e),
    };

    if !stored.options.allow_backward {
        return bad_request("This session is forward-only".to_string());
    }

    let mut session = match stored.open() {
        Ok(session) => session,
        Err(e) => return server_error(format!("Corrupt session state: {}", e)),
    };
    session.retreat();
    stored.absorb(&session);
    if let Err(e) = state.store.save(&stored) {
        tracing::error!(session = %session_id, error = %e, "failed to persist session");
        return server_error(format!("Failed to save progress: {}", e));
    }

    Redirect::to(&format!("/sessions/{}", session_id)).into_response()
}

fn store_error_page(session_id: &str, error: StoreError) -> Response {
    match error {
        StoreError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Html(templates::base_template(
                "Not Found",
                &templates::session_not_found(session_id),
            )),
        )
            .into_response(),
        e => server_error(format!("Failed to load session: {}", e)),
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(templates::base_template(
            "Bad Request",
            &format!("<p>{}</p>", crate::utils::html_escape(&message)),
        )),
    )
        .into_response()
}

fn server_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(templates::base_template(
            "Error",
            &format!("<p>{}</p>", crate::utils::html_escape(&message)),
        )),
    )
        .into_response()
}
