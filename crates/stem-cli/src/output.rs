use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Render a serializable value as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write a serializable value as pretty JSON, with a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let mut rendered = render_json(value)?;
    rendered.push('\n');
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))
}
