//! Diagram source configuration.

use serde::{Deserialize, Serialize};

/// Repository-relative location of the entity diagram.
pub const DEFAULT_DIAGRAM_PATH: &str = "docs/data-model.mmd";

fn default_path() -> String {
    DEFAULT_DIAGRAM_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiagramConfig {
    /// Path to the class diagram describing entities and fields.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
