//! The Plan State Store: one owned record plus explicit save/load.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::plan::PlanRecord;
use crate::plan::edit::PlanEdit;
use crate::plan::storage::KeyValueStore;
use crate::plan::PlanError;

/// Fixed key of the single persisted entry.
pub const STORAGE_KEY: &str = "employment_plan_pro_data";

/// Visible persistence status of the in-memory record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// The in-memory record may differ from the last persisted one.
    #[default]
    Idle,
    Saving,
    Saved,
}

/// Names one `save()` call. Pass it to [`PlanStore::complete_save`] to finish the
/// `Saving -> Saved` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    generation: u64,
}

pub struct PlanStore {
    storage: Box<dyn KeyValueStore>,
    record: Arc<PlanRecord>,
    status: SaveStatus,
    generation: u64,
}

impl PlanStore {
    /// A store holding `initial`. Nothing is read from storage until [`load`](Self::load).
    pub fn new(storage: Box<dyn KeyValueStore>, initial: PlanRecord) -> Self {
        Self {
            storage,
            record: Arc::new(initial),
            status: SaveStatus::Idle,
            generation: 0,
        }
    }

    /// Shared handle to the current record. Later edits never change a handle already
    /// returned.
    pub fn record(&self) -> Arc<PlanRecord> {
        Arc::clone(&self.record)
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Replaces the record with the persisted entry, if there is a valid one.
    ///
    /// Missing, unreadable or malformed entries leave the current record in place.
    pub fn load(&mut self) {
        let text = match self.storage.get(STORAGE_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("No saved plan under '{STORAGE_KEY}', keeping current record");
                return;
            }
            Err(e) => {
                warn!("Failed to read saved plan: {e}");
                return;
            }
        };

        match serde_json::from_str::<PlanRecord>(&text) {
            Ok(record) => {
                info!("Loaded saved plan for {}", record.full_name());
                self.record = Arc::new(record);
            }
            Err(e) => warn!("Failed to parse saved data: {e}"),
        }
    }

    /// Replaces exactly one field.
    pub fn set_field(&mut self, edit: PlanEdit) {
        debug!("Setting plan field '{}'", edit.field());
        self.record = Arc::new(edit.apply(&self.record));
        self.mark_dirty();
        self.note_unlisted_selection();
    }

    /// [`set_field`](Self::set_field) from a wire field name and JSON value.
    pub fn set_field_json(&mut self, name: &str, value: Value) -> Result<(), PlanError> {
        let edit = PlanEdit::from_json(name, value)?;
        self.set_field(edit);
        Ok(())
    }

    /// Applies several edits as a single record replacement.
    pub fn apply_edits(&mut self, edits: impl IntoIterator<Item = PlanEdit>) {
        let next = edits
            .into_iter()
            .fold((*self.record).clone(), |record, edit| edit.apply(&record));
        self.record = Arc::new(next);
        self.mark_dirty();
        self.note_unlisted_selection();
    }

    /// Serializes the whole record over the stored entry and enters `Saving`.
    pub fn save(&mut self) -> Result<SaveTicket, PlanError> {
        let text = serde_json::to_string(self.record.as_ref())?;
        self.storage.set(STORAGE_KEY, &text)?;

        self.generation += 1;
        self.status = SaveStatus::Saving;
        info!(
            "Saved plan ({} bytes, generation {})",
            text.len(),
            self.generation
        );
        Ok(SaveTicket {
            generation: self.generation,
        })
    }

    /// Moves `Saving -> Saved` for the latest save. Returns whether the status changed.
    ///
    /// A ticket from an older save, or one arriving after an edit reset the status, is
    /// ignored.
    pub fn complete_save(&mut self, ticket: SaveTicket) -> bool {
        if ticket.generation != self.generation || self.status != SaveStatus::Saving {
            debug!(
                "Ignoring stale save completion (ticket {}, current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        self.status = SaveStatus::Saved;
        true
    }

    fn mark_dirty(&mut self) {
        self.status = SaveStatus::Idle;
    }

    // Membership is the caller's responsibility; only report it.
    fn note_unlisted_selection(&self) {
        if !self.record.has_listed_selection() {
            debug!(
                "selectedJobOption '{}' is not among jobOptions",
                self.record.selected_job_option
            );
        }
    }
}
