//! Store error types.
//!
//! Only faults that make further calls pointless end up here. Expected
//! remote answers ("not found", "already exists", other API errors) are
//! [`crate::RemoteOutcome`] variants instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response carried a body that could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client could not be built from the given settings.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
