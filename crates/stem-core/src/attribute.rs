//! Backend attribute kinds and the declared-type policy.
//!
//! The document store offers a small closed set of typed primitives. Every
//! declared diagram type maps onto exactly one of them; this module is the
//! only place that encodes that policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size used for string-backed attributes declared as short strings.
pub const SHORT_STRING_SIZE: u32 = 255;

/// Size used for string-backed attributes declared as long-form text.
pub const LONG_TEXT_SIZE: u32 = 65_535;

/// Primitive attribute kinds supported by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Email,
    Url,
}

impl AttributeKind {
    pub const ALL: [Self; 7] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Datetime,
        Self::Email,
        Self::Url,
    ];

    /// Name used by the store's attribute endpoints.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Email => "email",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared diagram type onto a backend attribute kind.
///
/// Case-insensitive and total: unrecognized tokens fall back to
/// [`AttributeKind::String`]. `time` has no dedicated primitive and `enum`
/// values are stored as free strings.
#[must_use]
pub fn map_declared_type(declared_type: &str) -> AttributeKind {
    match declared_type.trim().to_ascii_lowercase().as_str() {
        "int" | "integer" => AttributeKind::Integer,
        "date" | "datetime" => AttributeKind::Datetime,
        "boolean" | "bool" => AttributeKind::Boolean,
        "decimal" | "float" | "double" => AttributeKind::Float,
        "email" => AttributeKind::Email,
        "url" => AttributeKind::Url,
        // string, text, richtext, media, time, enum, and anything unknown
        _ => AttributeKind::String,
    }
}

/// Storage size for a declared type, if it maps to a string attribute.
///
/// Long-form declarations (`text`, `richtext`) get [`LONG_TEXT_SIZE`], every
/// other string-backed declaration gets [`SHORT_STRING_SIZE`]. Non-string
/// kinds (including `email` and `url`) carry no size.
#[must_use]
pub fn string_size(declared_type: &str) -> Option<u32> {
    if map_declared_type(declared_type) != AttributeKind::String {
        return None;
    }
    match declared_type.trim().to_ascii_lowercase().as_str() {
        "text" | "richtext" => Some(LONG_TEXT_SIZE),
        _ => Some(SHORT_STRING_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for kind in AttributeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn string_size_only_for_string_kinds() {
        assert_eq!(string_size("string"), Some(SHORT_STRING_SIZE));
        assert_eq!(string_size("RichText"), Some(LONG_TEXT_SIZE));
        assert_eq!(string_size("enum"), Some(SHORT_STRING_SIZE));
        assert_eq!(string_size("email"), None);
        assert_eq!(string_size("int"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(map_declared_type("  Decimal "), AttributeKind::Float);
    }
}
