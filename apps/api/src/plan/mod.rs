// Plan State Store: the in-memory plan record, field-level edits and explicit
// save/load against a durable key-value medium.

pub mod edit;
pub mod handlers;
pub mod storage;
pub mod store;

use thiserror::Error;

pub use edit::{PlanEdit, PlanField};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{PlanStore, SaveStatus, SaveTicket, STORAGE_KEY};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unknown plan field '{0}'")]
    UnknownField(String),

    #[error("Field '{field}' expects {expected}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),
}
