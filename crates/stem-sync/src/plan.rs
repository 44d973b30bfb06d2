//! What a reconciliation run would do, derived purely from the schema.

use serde::{Deserialize, Serialize};
use stem_core::{Schema, collection_id};
use stem_store::AttributeSpec;

/// One attribute to create, with the type it was declared as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePlan {
    #[serde(flatten)]
    pub spec: AttributeSpec,
    pub declared_type: String,
}

/// One collection and the attributes it gets when freshly created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPlan {
    pub entity: String,
    pub collection_id: String,
    pub attributes: Vec<AttributePlan>,
}

/// Every collection in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncPlan {
    collections: Vec<CollectionPlan>,
}

impl SyncPlan {
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let collections = schema
            .entities()
            .iter()
            .map(|entity| CollectionPlan {
                entity: entity.name.clone(),
                collection_id: collection_id(&entity.name),
                attributes: entity
                    .fields
                    .iter()
                    .map(|field| AttributePlan {
                        spec: AttributeSpec::from_field(field),
                        declared_type: field.declared_type.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self { collections }
    }

    #[must_use]
    pub fn collections(&self) -> &[CollectionPlan] {
        &self.collections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.collections.iter().map(|c| c.attributes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stem_core::{AttributeKind, EntitySchema, FieldDeclaration};

    use super::*;

    fn schema() -> Schema {
        let mut rsvp = EntitySchema::new("RSVP").unwrap();
        rsvp.push_field(FieldDeclaration::new("role", "enum", false))
            .unwrap();
        rsvp.push_field(FieldDeclaration::new("checked_in_at", "datetime", false))
            .unwrap();
        let mut person = EntitySchema::new("Person").unwrap();
        person
            .push_field(FieldDeclaration::new("specializations", "string", true))
            .unwrap();
        [rsvp, person].into_iter().collect()
    }

    #[test]
    fn plan_resolves_collection_ids_in_order() {
        let plan = SyncPlan::from_schema(&schema());
        let ids: Vec<&str> = plan
            .collections()
            .iter()
            .map(|c| c.collection_id.as_str())
            .collect();
        assert_eq!(ids, vec!["rsvps", "persons"]);
        assert_eq!(plan.attribute_count(), 3);
    }

    #[test]
    fn plan_maps_declared_types() {
        let plan = SyncPlan::from_schema(&schema());
        let rsvp = &plan.collections()[0];
        assert_eq!(rsvp.attributes[0].spec.kind, AttributeKind::String);
        assert_eq!(rsvp.attributes[0].declared_type, "enum");
        assert_eq!(rsvp.attributes[1].spec.kind, AttributeKind::Datetime);
        assert!(plan.collections()[1].attributes[0].spec.array);
    }

    #[test]
    fn plan_serializes_flat_attributes() {
        let plan = SyncPlan::from_schema(&schema());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json[0]["entity"], "RSVP");
        assert_eq!(json[0]["attributes"][1]["kind"], "datetime");
        assert_eq!(json[0]["attributes"][1]["declared_type"], "datetime");
        assert!(json[0]["attributes"][1].get("size").is_none());
        assert_eq!(json[1]["attributes"][0]["size"], 255);
    }

    #[test]
    fn empty_schema_gives_empty_plan() {
        let plan = SyncPlan::from_schema(&Schema::default());
        assert!(plan.is_empty());
    }
}
