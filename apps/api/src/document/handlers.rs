//! Axum route handlers for the document preview.

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::document::{render_document, render_markdown, PlanDocument};
use crate::state::AppState;

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<PlanDocument> {
    let record = state.store.lock().await.record();
    Json(render_document(&record))
}

/// GET /api/v1/document/markdown
pub async fn handle_get_document_markdown(State(state): State<AppState>) -> impl IntoResponse {
    let record = state.store.lock().await.record();
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&render_document(&record)),
    )
}
