//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or a value has the wrong type.
    #[error("cannot load configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("store.{field} is not set (export {variables})")]
    MissingCredential {
        field: &'static str,
        variables: &'static str,
    },

    #[error("store endpoint '{0}' is not an http(s) URL")]
    InvalidEndpoint(String),

    #[error("store.database_id must not be empty")]
    EmptyDatabaseId,

    #[error("not_found_status and conflict_status are both {0}; outcomes could not be told apart")]
    SharedStatus(u16),
}
