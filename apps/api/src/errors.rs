use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::plan::PlanError;
use crate::signature::SignatureError;
use crate::suggestions::SuggestionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Plan(e @ (PlanError::UnknownField(_) | PlanError::InvalidValue { .. })) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Plan(e) => {
                tracing::error!("Plan storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "The plan could not be saved".to_string(),
                )
            }
            AppError::Signature(e) => {
                tracing::error!("Signature error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SIGNATURE_ERROR",
                    "The signature could not be encoded".to_string(),
                )
            }
            AppError::Suggestion(e @ SuggestionError::MissingInterest) => (
                StatusCode::BAD_REQUEST,
                "MISSING_INTEREST",
                e.notice().to_string(),
            ),
            AppError::Suggestion(e) => {
                tracing::error!("Suggestion error: {e}");
                (StatusCode::BAD_GATEWAY, "SUGGESTION_ERROR", e.notice().to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
