//! Canonical in-memory schema derived from the entity diagram.
//!
//! Entities and fields keep source order. Downstream attribute creation
//! iterates this order, so two parses of the same text always drive the same
//! sequence of remote calls.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One typed field of an entity.
///
/// `declared_type` is the raw token from the diagram (`string`, `richtext`,
/// `decimal`, ...). It is never validated here; unknown tokens are mapped to
/// a backend kind later by [`crate::map_declared_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub declared_type: String,
    pub is_array: bool,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_array,
        }
    }
}

/// A logical record type and its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

impl EntitySchema {
    /// Create an entity with no fields.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if `name` is not an
    /// identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(CoreError::InvalidIdentifier(name));
        }
        Ok(Self {
            name,
            fields: Vec::new(),
        })
    }

    /// Append a field, keeping declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] for a malformed field name and
    /// [`CoreError::DuplicateField`] if the name is already declared. The
    /// entity is left unchanged in both cases.
    pub fn push_field(&mut self, field: FieldDeclaration) -> Result<(), CoreError> {
        if !is_identifier(&field.name) {
            return Err(CoreError::InvalidIdentifier(field.name));
        }
        if self.field(&field.name).is_some() {
            return Err(CoreError::DuplicateField {
                entity: self.name.clone(),
                field: field.name,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Ordered mapping from entity name to its field declarations.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entities: Vec<EntitySchema>,
}

impl Schema {
    /// Return the entity named `name`, appending an empty one if absent.
    ///
    /// A repeated entity block therefore extends the entity at its first
    /// position instead of creating a second entry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if a new entity would have to
    /// be created under a malformed name.
    pub fn entity_or_insert(&mut self, name: &str) -> Result<&mut EntitySchema, CoreError> {
        let idx = match self.entities.iter().position(|e| e.name == name) {
            Some(idx) => idx,
            None => {
                self.entities.push(EntitySchema::new(name)?);
                self.entities.len() - 1
            }
        };
        Ok(&mut self.entities[idx])
    }

    /// Drop every entity that ended up with zero fields.
    pub fn retain_populated(&mut self) {
        self.entities.retain(|e| !e.fields.is_empty());
    }

    #[must_use]
    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of field declarations across all entities.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.entities.iter().map(|e| e.fields.len()).sum()
    }
}

impl FromIterator<EntitySchema> for Schema {
    fn from_iter<I: IntoIterator<Item = EntitySchema>>(iter: I) -> Self {
        let mut schema = Self {
            entities: iter.into_iter().collect(),
        };
        schema.retain_populated();
        schema
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
#[must_use]
pub fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
