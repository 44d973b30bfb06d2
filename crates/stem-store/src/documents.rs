//! Document listings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Largest page the store will return for a single listing.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Ordering and page size for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentQuery {
    /// Attribute to sort on, newest first.
    pub order_desc: Option<String>,
    /// Page size, clamped to [`MAX_PAGE_SIZE`].
    pub limit: Option<u32>,
}

impl DocumentQuery {
    #[must_use]
    pub fn order_desc(mut self, attribute: impl Into<String>) -> Self {
        self.order_desc = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_PAGE_SIZE));
        self
    }

    /// Render as the store's JSON query strings.
    pub(crate) fn to_queries(&self) -> Vec<String> {
        let mut queries = Vec::new();
        if let Some(attribute) = &self.order_desc {
            queries.push(json!({ "method": "orderDesc", "attribute": attribute }).to_string());
        }
        if let Some(limit) = self.limit {
            queries.push(json!({ "method": "limit", "values": [limit.min(MAX_PAGE_SIZE)] }).to_string());
        }
        queries
    }

    /// Render as a URL query string, including the leading `?` when
    /// non-empty.
    pub(crate) fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .to_queries()
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(q)))
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// One stored document. Fields are kept as loose JSON since stored data is
/// not validated against the declared schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field("$id")
    }

    /// Store-assigned creation timestamp (RFC 3339).
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.str_field("$createdAt")
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// A string field, treating empty strings as absent.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.field(name).and_then(Value::as_i64)
    }
}

/// A page of documents plus the store's total match count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}
