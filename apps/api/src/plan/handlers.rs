//! Axum route handlers for the plan record.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::plan::PlanRecord;
use crate::plan::{PlanStore, SaveStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub record: PlanRecord,
    pub status: SaveStatus,
}

impl PlanResponse {
    pub fn from_store(store: &PlanStore) -> Self {
        Self {
            record: store.record().as_ref().clone(),
            status: store.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: SaveStatus,
}

/// GET /api/v1/plan
pub async fn handle_get_plan(State(state): State<AppState>) -> Json<PlanResponse> {
    Json(PlanResponse::from_store(&*state.store.lock().await))
}

/// PATCH /api/v1/plan/fields/:name
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.set_field_json(&name, req.value)?;
    Ok(Json(PlanResponse::from_store(&store)))
}

/// POST /api/v1/plan/save
///
/// Persists immediately; the status reads "saving" until the settle delay elapses.
pub async fn handle_save(State(state): State<AppState>) -> Result<Json<PlanResponse>, AppError> {
    let mut store = state.store.lock().await;
    let ticket = store.save()?;
    state.schedule_saved_flip(ticket);
    Ok(Json(PlanResponse::from_store(&store)))
}

/// POST /api/v1/plan/load
pub async fn handle_load(State(state): State<AppState>) -> Json<PlanResponse> {
    let mut store = state.store.lock().await;
    store.load();
    Json(PlanResponse::from_store(&store))
}

/// GET /api/v1/plan/status
pub async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.store.lock().await.status(),
    })
}
