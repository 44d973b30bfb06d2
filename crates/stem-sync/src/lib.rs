//! # stem-sync
//!
//! Turns a parsed [`stem_core::Schema`] into a [`SyncPlan`] and applies it to
//! a [`stem_store::SchemaStore`] without destructive changes.
//!
//! The store offers no way to list the attributes of an existing collection,
//! so attributes are only created for collections created in the same run.
//! Re-running against a partially provisioned database will not back-fill
//! fields on collections that already exist.

mod error;
mod plan;
mod reconcile;
mod report;

pub use error::SyncError;
pub use plan::{AttributePlan, CollectionPlan, SyncPlan};
pub use reconcile::{DEFAULT_DATABASE_NAME, Reconciler, SyncEvent};
pub use report::{AttributeOutcome, AttributeReport, CollectionReport, ResourceState, SyncReport};
