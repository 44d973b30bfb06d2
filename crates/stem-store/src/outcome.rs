//! Typed remote outcomes and the status predicates that produce them.

use serde::Deserialize;

/// Result of one remote call that reached the store.
///
/// For get calls `Found` carries the existing resource; for create calls it
/// carries the resource that was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    Found(T),
    NotFound,
    Conflict,
    Other { status: u16, message: String },
}

impl<T> RemoteOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteOutcome<U> {
        match self {
            Self::Found(value) => RemoteOutcome::Found(f(value)),
            Self::NotFound => RemoteOutcome::NotFound,
            Self::Conflict => RemoteOutcome::Conflict,
            Self::Other { status, message } => RemoteOutcome::Other { status, message },
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// The two independently configurable status predicates used to classify
/// non-success responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    pub not_found: u16,
    pub conflict: u16,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            not_found: 404,
            conflict: 409,
        }
    }
}

impl StatusPolicy {
    pub fn from_config(config: &stem_config::StoreConfig) -> Self {
        Self {
            not_found: config.not_found_status,
            conflict: config.conflict_status,
        }
    }

    /// Classify a non-success status and its response body.
    pub fn classify<T>(self, status: u16, body: &str) -> RemoteOutcome<T> {
        if status == self.not_found {
            RemoteOutcome::NotFound
        } else if status == self.conflict {
            RemoteOutcome::Conflict
        } else {
            RemoteOutcome::Other {
                status,
                message: error_message(body),
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull `message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| body.trim().to_string(),
        |parsed| parsed.message,
    )
}
