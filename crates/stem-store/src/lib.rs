//! # stem-store
//!
//! The remote document store as seen by the provisioning and listing tools.
//!
//! Two capabilities are exposed as traits so callers can be exercised
//! against in-memory fakes:
//! - [`SchemaStore`]: databases, collections and attributes
//! - [`DocumentStore`]: ordered, limited document listings
//!
//! [`AppwriteClient`] implements both over the store's REST API.
//!
//! Every call returns `Result<RemoteOutcome<T>, StoreError>`. The outer
//! `Err` is a transport fault; expected remote answers are variants of
//! [`RemoteOutcome`].

mod appwrite;
mod documents;
mod error;
mod http;
mod outcome;

pub use appwrite::AppwriteClient;
pub use documents::{Document, DocumentList, DocumentQuery, MAX_PAGE_SIZE};
pub use error::StoreError;
pub use outcome::{RemoteOutcome, StatusPolicy};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stem_core::{AttributeKind, FieldDeclaration, map_declared_type, string_size};

// ── Types ──────────────────────────────────────────────────────────

/// A database as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
}

/// A collection as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
}

/// An attribute as reported by the store after creation.
///
/// Attributes are built asynchronously on the server, so `status` is
/// usually `processing` right after creation. The payload shape differs
/// between store versions and kinds; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

/// Everything needed to create one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub key: String,
    pub kind: AttributeKind,
    pub array: bool,
    pub required: bool,
    /// Only set for string-backed attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl AttributeSpec {
    /// Derive the attribute for a declared field. Provisioned attributes
    /// are never required.
    #[must_use]
    pub fn from_field(field: &FieldDeclaration) -> Self {
        Self {
            key: field.name.clone(),
            kind: map_declared_type(&field.declared_type),
            array: field.is_array,
            required: false,
            size: string_size(&field.declared_type),
        }
    }
}

// ── Capabilities ───────────────────────────────────────────────────

/// Schema-level operations against a document store.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    async fn get_database(&self, database_id: &str)
    -> Result<RemoteOutcome<Database>, StoreError>;

    async fn create_database(
        &self,
        database_id: &str,
        name: &str,
    ) -> Result<RemoteOutcome<Database>, StoreError>;

    async fn get_collection(
        &self,
        database_id: &str,
        collection_id: &str,
    ) -> Result<RemoteOutcome<Collection>, StoreError>;

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
    ) -> Result<RemoteOutcome<Collection>, StoreError>;

    async fn create_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        spec: &AttributeSpec,
    ) -> Result<RemoteOutcome<Attribute>, StoreError>;
}

/// Read access to documents in a collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        query: &DocumentQuery,
    ) -> Result<RemoteOutcome<DocumentList>, StoreError>;
}
