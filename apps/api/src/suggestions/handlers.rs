//! Axum route handler for suggestion generation.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::plan::PlanRecord;
use crate::suggestions::{apply_suggestions, Suggestions};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Suggestions,
    pub record: PlanRecord,
}

/// Clears the in-flight flag when the request finishes, however it finishes.
struct GeneratingGuard<'a>(&'a AtomicBool);

impl<'a> GeneratingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// POST /api/v1/suggestions
///
/// Generates from the record's current field of interest and applies the result.
pub async fn handle_generate_suggestions(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let _guard = GeneratingGuard::acquire(&state.is_generating).ok_or_else(|| {
        AppError::Conflict("Suggestions are already being generated".to_string())
    })?;

    let suggestions = apply_suggestions(&state.store, state.suggestions.as_ref()).await?;
    let record = state.store.lock().await.record().as_ref().clone();

    Ok(Json(SuggestionsResponse {
        suggestions,
        record,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = GeneratingGuard::acquire(&flag).unwrap();
        assert!(GeneratingGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(GeneratingGuard::acquire(&flag).is_some());
    }
}
