//! Outcome of a reconciliation run.

use serde::Serialize;
use stem_core::AttributeKind;

/// Whether a database or collection was found or created by this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    Existing,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AttributeOutcome {
    Created,
    AlreadyExists,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReport {
    pub key: String,
    pub kind: AttributeKind,
    #[serde(flatten)]
    pub outcome: AttributeOutcome,
}

/// A pre-existing collection has an empty `attributes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub entity: String,
    pub collection_id: String,
    pub state: ResourceState,
    pub attributes: Vec<AttributeReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub database_id: String,
    pub database: ResourceState,
    pub collections: Vec<CollectionReport>,
}

impl SyncReport {
    #[must_use]
    pub fn collections_in(&self, state: ResourceState) -> usize {
        self.collections.iter().filter(|c| c.state == state).count()
    }

    fn attributes(&self) -> impl Iterator<Item = &AttributeReport> {
        self.collections.iter().flat_map(|c| c.attributes.iter())
    }

    #[must_use]
    pub fn attributes_created(&self) -> usize {
        self.attributes()
            .filter(|a| a.outcome == AttributeOutcome::Created)
            .count()
    }

    #[must_use]
    pub fn attributes_skipped(&self) -> usize {
        self.attributes()
            .filter(|a| a.outcome == AttributeOutcome::AlreadyExists)
            .count()
    }

    /// Attributes that could not be created, as `(collection_id, report)`.
    #[must_use]
    pub fn failures(&self) -> Vec<(&str, &AttributeReport)> {
        self.collections
            .iter()
            .flat_map(|c| {
                c.attributes
                    .iter()
                    .filter(|a| matches!(a.outcome, AttributeOutcome::Failed { .. }))
                    .map(move |a| (c.collection_id.as_str(), a))
            })
            .collect()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures().is_empty()
    }
}
