//! Get-then-create reconciliation.
//!
//! Calls are issued one at a time in plan order. Running two reconcilers
//! against the same database at once is unsafe: there is a window between
//! each get and its create.

use stem_core::AttributeKind;
use stem_store::{AttributeSpec, RemoteOutcome, SchemaStore, StoreError};

use crate::error::SyncError;
use crate::plan::{AttributePlan, CollectionPlan, SyncPlan};
use crate::report::{AttributeOutcome, AttributeReport, CollectionReport, ResourceState, SyncReport};

/// Display name given to a database created by the reconciler.
pub const DEFAULT_DATABASE_NAME: &str = "STEM Network Database";

/// Progress notifications, emitted in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    DatabaseExists { database_id: &'a str },
    DatabaseCreating { database_id: &'a str },
    DatabaseCreated { database_id: &'a str },
    CollectionStarted { entity: &'a str },
    CollectionExists { entity: &'a str, collection_id: &'a str },
    CollectionCreating { entity: &'a str, collection_id: &'a str },
    CollectionCreated { entity: &'a str, collection_id: &'a str },
    AttributeCreated { key: &'a str, kind: AttributeKind },
    AttributeExists { key: &'a str },
    AttributeFailed { key: &'a str, reason: &'a str },
}

type Observer<'a> = Box<dyn FnMut(&SyncEvent<'_>) + 'a>;

pub struct Reconciler<'a> {
    store: &'a dyn SchemaStore,
    database_id: &'a str,
    observer: Option<Observer<'a>>,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(store: &'a dyn SchemaStore, database_id: &'a str) -> Self {
        Self {
            store,
            database_id,
            observer: None,
        }
    }

    #[must_use]
    pub fn on_event(mut self, observer: impl FnMut(&SyncEvent<'_>) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Ensure the database, then every planned collection. Attributes are
    /// only created for collections this run created.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] if the store cannot be reached, or
    /// [`SyncError::Database`] / [`SyncError::Collection`] if the store
    /// answers a get or create with anything other than found, not found or
    /// conflict. Collections already handled stay in place.
    pub async fn reconcile(&mut self, plan: &SyncPlan) -> Result<SyncReport, SyncError> {
        let database = self.ensure_database().await?;
        let mut collections = Vec::with_capacity(plan.len());
        for collection in plan.collections() {
            collections.push(self.ensure_collection(collection).await?);
        }
        tracing::debug!(
            database_id = self.database_id,
            collections = collections.len(),
            "reconciliation finished"
        );
        Ok(SyncReport {
            database_id: self.database_id.to_string(),
            database,
            collections,
        })
    }

    fn emit(&mut self, event: &SyncEvent<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }

    async fn ensure_database(&mut self) -> Result<ResourceState, SyncError> {
        let database_id = self.database_id;
        let fail = |reason: String| SyncError::Database {
            database_id: database_id.to_string(),
            reason,
        };

        match self.store.get_database(database_id).await? {
            RemoteOutcome::Found(_) => {
                self.emit(&SyncEvent::DatabaseExists { database_id });
                return Ok(ResourceState::Existing);
            }
            RemoteOutcome::NotFound => {}
            other => return Err(fail(describe(&other))),
        }

        self.emit(&SyncEvent::DatabaseCreating { database_id });
        match self
            .store
            .create_database(database_id, DEFAULT_DATABASE_NAME)
            .await?
        {
            RemoteOutcome::Found(_) => {
                tracing::info!(database_id, "created database");
                self.emit(&SyncEvent::DatabaseCreated { database_id });
                Ok(ResourceState::Created)
            }
            RemoteOutcome::Conflict => {
                tracing::debug!(database_id, "database appeared between get and create");
                self.emit(&SyncEvent::DatabaseExists { database_id });
                Ok(ResourceState::Existing)
            }
            other => Err(fail(describe(&other))),
        }
    }

    async fn ensure_collection(
        &mut self,
        plan: &CollectionPlan,
    ) -> Result<CollectionReport, SyncError> {
        let entity = plan.entity.as_str();
        let collection_id = plan.collection_id.as_str();
        let fail = |reason: String| SyncError::Collection {
            entity: entity.to_string(),
            collection_id: collection_id.to_string(),
            reason,
        };
        let report = |state: ResourceState, attributes: Vec<AttributeReport>| CollectionReport {
            entity: entity.to_string(),
            collection_id: collection_id.to_string(),
            state,
            attributes,
        };

        self.emit(&SyncEvent::CollectionStarted { entity });
        match self
            .store
            .get_collection(self.database_id, collection_id)
            .await?
        {
            RemoteOutcome::Found(_) => {
                self.emit(&SyncEvent::CollectionExists {
                    entity,
                    collection_id,
                });
                return Ok(report(ResourceState::Existing, Vec::new()));
            }
            RemoteOutcome::NotFound => {}
            other => return Err(fail(describe(&other))),
        }

        self.emit(&SyncEvent::CollectionCreating {
            entity,
            collection_id,
        });
        match self
            .store
            .create_collection(self.database_id, collection_id, entity)
            .await?
        {
            RemoteOutcome::Found(_) => {
                tracing::info!(collection_id, entity, "created collection");
                self.emit(&SyncEvent::CollectionCreated {
                    entity,
                    collection_id,
                });
            }
            RemoteOutcome::Conflict => {
                // Created by someone else since the get: not fresh.
                tracing::debug!(collection_id, "collection appeared between get and create");
                self.emit(&SyncEvent::CollectionExists {
                    entity,
                    collection_id,
                });
                return Ok(report(ResourceState::Existing, Vec::new()));
            }
            other => return Err(fail(describe(&other))),
        }

        let mut attributes = Vec::with_capacity(plan.attributes.len());
        for attribute in &plan.attributes {
            attributes.push(self.create_attribute(collection_id, attribute).await?);
        }
        Ok(report(ResourceState::Created, attributes))
    }

    async fn create_attribute(
        &mut self,
        collection_id: &str,
        plan: &AttributePlan,
    ) -> Result<AttributeReport, SyncError> {
        let spec = &plan.spec;
        let key = spec.key.as_str();
        let result = self
            .store
            .create_attribute(self.database_id, collection_id, spec)
            .await;
        let failure = match result {
            Ok(RemoteOutcome::Found(_)) => None,
            Ok(RemoteOutcome::Conflict) => {
                tracing::info!(collection_id, key, "attribute already exists");
                self.emit(&SyncEvent::AttributeExists { key });
                return Ok(attribute_report(spec, AttributeOutcome::AlreadyExists));
            }
            Ok(other) => Some(describe(&other)),
            // The store answered; only its payload was unreadable.
            Err(StoreError::Decode(error)) => Some(format!("unreadable response: {error}")),
            Err(error) => return Err(error.into()),
        };

        let outcome = match failure {
            None => {
                tracing::info!(collection_id, key, kind = %spec.kind, "created attribute");
                self.emit(&SyncEvent::AttributeCreated {
                    key,
                    kind: spec.kind,
                });
                AttributeOutcome::Created
            }
            Some(reason) => {
                tracing::warn!(collection_id, key, %reason, "attribute creation failed");
                self.emit(&SyncEvent::AttributeFailed {
                    key,
                    reason: &reason,
                });
                AttributeOutcome::Failed { reason }
            }
        };
        Ok(attribute_report(spec, outcome))
    }
}

fn attribute_report(spec: &AttributeSpec, outcome: AttributeOutcome) -> AttributeReport {
    AttributeReport {
        key: spec.key.clone(),
        kind: spec.kind,
        outcome,
    }
}

/// Human-readable reason for an outcome the reconciler cannot act on.
fn describe<T>(outcome: &RemoteOutcome<T>) -> String {
    match outcome {
        RemoteOutcome::Found(_) => "unexpected success".to_string(),
        RemoteOutcome::NotFound => "not found".to_string(),
        RemoteOutcome::Conflict => "conflict".to_string(),
        RemoteOutcome::Other { status, message } if message.is_empty() => {
            format!("status {status}")
        }
        RemoteOutcome::Other { status, message } => format!("status {status}: {message}"),
    }
}
