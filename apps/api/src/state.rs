use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::plan::{PlanStore, SaveTicket};
use crate::signature::SignaturePad;
use crate::suggestions::SuggestionService;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each mutex serializes access so every store or pad operation runs one at a time.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<PlanStore>>,
    pub pad: Arc<Mutex<SignaturePad>>,
    /// Pluggable suggestion source. `DisabledSuggestionService` when no API key is set.
    pub suggestions: Arc<dyn SuggestionService>,
    /// Set while a suggestion call is in flight; only one runs at a time.
    pub is_generating: Arc<AtomicBool>,
    pub save_settle: Duration,
    pending_flip: Arc<std::sync::Mutex<Option<JoinHandle<()>>>>,
}

impl AppState {
    pub fn new(
        store: PlanStore,
        suggestions: Arc<dyn SuggestionService>,
        save_settle: Duration,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            pad: Arc::new(Mutex::new(SignaturePad::new())),
            suggestions,
            is_generating: Arc::new(AtomicBool::new(false)),
            save_settle,
            pending_flip: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Schedules the `Saving -> Saved` flip for `ticket`, aborting any flip still
    /// pending from an earlier save.
    pub fn schedule_saved_flip(&self, ticket: SaveTicket) {
        let store = Arc::clone(&self.store);
        let delay = self.save_settle;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let flipped = store.lock().await.complete_save(ticket);
            debug!("Save settle elapsed (flipped: {flipped})");
        });

        let mut pending = match self.pending_flip.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}
