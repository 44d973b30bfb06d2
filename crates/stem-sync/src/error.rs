use stem_store::StoreError;
use thiserror::Error;

/// Faults that abort a reconciliation run.
///
/// Per-attribute failures are not errors; they are recorded in the
/// [`crate::SyncReport`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("store unreachable: {0}")]
    Transport(#[from] StoreError),

    #[error("cannot ensure database '{database_id}': {reason}")]
    Database { database_id: String, reason: String },

    #[error("cannot ensure collection '{collection_id}' for {entity}: {reason}")]
    Collection {
        entity: String,
        collection_id: String,
        reason: String,
    },
}
