//! Diagram loading error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    /// The diagram file is missing or unreadable.
    #[error("cannot read diagram at {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The diagram was read but declares no entity with at least one field.
    #[error("diagram declares no entities{}", location(.path))]
    EmptySchema { path: Option<PathBuf> },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}
