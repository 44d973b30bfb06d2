//! # stem-diagram
//!
//! Parses the entity diagram (a Mermaid `classDiagram`) into a
//! [`stem_core::Schema`].
//!
//! ```text
//! classDiagram
//!   class Metro {
//!     +name: string
//!     +coordinator_email: email
//!     +tags: string[]
//!   }
//! ```
//!
//! Only class blocks are read. Relationship lines, annotations and anything
//! else outside a block is skipped.

mod error;
mod parser;

pub use error::DiagramError;
pub use parser::{parse_diagram, parse_schema};

use std::path::Path;

use stem_core::Schema;

/// Read and parse a diagram file.
///
/// # Errors
///
/// Returns [`DiagramError::FileAccess`] if the file is missing or
/// unreadable, and [`DiagramError::EmptySchema`] if it parses to zero
/// entities.
pub fn load_schema(path: &Path) -> Result<Schema, DiagramError> {
    let text = std::fs::read_to_string(path).map_err(|source| DiagramError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = parse_diagram(&text);
    if schema.is_empty() {
        return Err(DiagramError::EmptySchema {
            path: Some(path.to_path_buf()),
        });
    }

    tracing::debug!(
        path = %path.display(),
        entities = schema.len(),
        fields = schema.field_count(),
        "loaded diagram"
    );
    Ok(schema)
}
