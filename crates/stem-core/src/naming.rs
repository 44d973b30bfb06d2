//! Collection id resolution.
//!
//! The resolved id is the idempotency key the reconciler uses against the
//! remote store, so resolution must never change for a given entity name.

/// Entities whose collection id is not the naive plural.
const OVERRIDES: &[(&str, &str)] = &[
    ("RSVP", "rsvps"),
    ("JobPosting", "job_postings"),
    ("EventPrototype", "event_prototypes"),
    ("InstructorAssignment", "instructor_assignments"),
    ("InstructorEvaluation", "instructor_evaluations"),
];

/// Resolve the collection id for an entity name.
///
/// Consults the override table first, then falls back to lowercasing the
/// name and appending `s`.
#[must_use]
pub fn collection_id(entity_name: &str) -> String {
    OVERRIDES
        .iter()
        .find(|(entity, _)| *entity == entity_name)
        .map_or_else(
            || format!("{}s", entity_name.to_lowercase()),
            |(_, id)| (*id).to_string(),
        )
}
