pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::document::handlers as document;
use crate::plan::handlers as plan;
use crate::signature::handlers as signature;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Plan record
        .route("/api/v1/plan", get(plan::handle_get_plan))
        .route("/api/v1/plan/fields/:name", patch(plan::handle_set_field))
        .route("/api/v1/plan/save", post(plan::handle_save))
        .route("/api/v1/plan/load", post(plan::handle_load))
        .route("/api/v1/plan/status", get(plan::handle_status))
        // Signature pad
        .route("/api/v1/signature", get(signature::handle_get_signature))
        .route(
            "/api/v1/signature/events",
            post(signature::handle_signature_event),
        )
        .route(
            "/api/v1/signature/clear",
            post(signature::handle_signature_clear),
        )
        // Suggestions
        .route(
            "/api/v1/suggestions",
            post(suggestions::handle_generate_suggestions),
        )
        // Document preview
        .route("/api/v1/document", get(document::handle_get_document))
        .route(
            "/api/v1/document/markdown",
            get(document::handle_get_document_markdown),
        )
        .with_state(state)
}
