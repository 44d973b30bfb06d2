//! # stem-core
//!
//! Core types shared by the STEM Network provisioning crates.
//!
//! This crate provides:
//! - The canonical schema model (entities and their typed field declarations)
//! - The closed set of backend attribute kinds and the declared-type mapping
//! - Collection id resolution for entity names
//! - Cross-cutting error types

pub mod attribute;
pub mod errors;
pub mod naming;
pub mod schema;

pub use attribute::{AttributeKind, map_declared_type, string_size};
pub use errors::CoreError;
pub use naming::collection_id;
pub use schema::{EntitySchema, FieldDeclaration, Schema};
