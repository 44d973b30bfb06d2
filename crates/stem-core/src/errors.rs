//! Cross-cutting error types for the schema model.
//!
//! Parse and transport errors live in their own crates (`DiagramError`,
//! `StoreError`, `SyncError`); this module only covers violations of the
//! schema model itself.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A field name was declared twice within one entity.
    #[error("Duplicate field '{field}' in entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    /// An entity or field name is empty or contains characters the remote
    /// store rejects as an identifier.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),
}
