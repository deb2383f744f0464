//! Axum route handlers for the signature pad. Commits and clears are forwarded into the
//! plan store as `signatureData` edits.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::plan::{PlanEdit, PlanStore};
use crate::signature::{EncodedImage, InputEvent, PadState, SignatureSink, SurfaceOrigin};
use crate::state::AppState;

/// Writes pad output into the plan record.
pub struct StoreSink<'a> {
    store: &'a mut PlanStore,
    committed: bool,
}

impl<'a> StoreSink<'a> {
    pub fn new(store: &'a mut PlanStore) -> Self {
        Self {
            store,
            committed: false,
        }
    }
}

impl SignatureSink for StoreSink<'_> {
    fn on_stroke_committed(&mut self, image: EncodedImage) {
        self.store
            .set_field(PlanEdit::SignatureData(Some(image.into_string())));
        self.committed = true;
    }

    fn on_cleared(&mut self) {
        self.store.set_field(PlanEdit::SignatureData(None));
    }
}

#[derive(Debug, Deserialize)]
pub struct SignatureEventRequest {
    pub event: InputEvent,
    #[serde(default)]
    pub origin: SurfaceOrigin,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub drawing: bool,
    pub committed: bool,
    /// No ink on the surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blank: Option<bool>,
    pub signature_data: Option<String>,
}

/// POST /api/v1/signature/events
pub async fn handle_signature_event(
    State(state): State<AppState>,
    Json(req): Json<SignatureEventRequest>,
) -> Result<Json<SignatureResponse>, AppError> {
    let mut pad = state.pad.lock().await;
    let mut store = state.store.lock().await;

    let mut sink = StoreSink::new(&mut store);
    pad.handle(&req.event, req.origin, &mut sink)?;
    let committed = sink.committed;

    Ok(Json(SignatureResponse {
        drawing: matches!(pad.state(), PadState::Drawing { .. }),
        committed,
        blank: None,
        signature_data: store.record().signature_data.clone(),
    }))
}

/// GET /api/v1/signature
///
/// The pad's most recently committed image.
pub async fn handle_get_signature(State(state): State<AppState>) -> Json<SignatureResponse> {
    let pad = state.pad.lock().await;
    Json(SignatureResponse {
        drawing: matches!(pad.state(), PadState::Drawing { .. }),
        committed: false,
        blank: Some(pad.surface().is_blank()),
        signature_data: pad.latest().map(|image| image.as_str().to_string()),
    })
}

/// POST /api/v1/signature/clear
pub async fn handle_signature_clear(State(state): State<AppState>) -> Json<SignatureResponse> {
    let mut pad = state.pad.lock().await;
    let mut store = state.store.lock().await;

    pad.clear(&mut StoreSink::new(&mut store));

    Json(SignatureResponse {
        drawing: false,
        committed: false,
        blank: None,
        signature_data: store.record().signature_data.clone(),
    })
}
