//! Type graph model for gqlschema.
//!
//! This crate defines the normalized, named type graph that the schema graph
//! builder produces and that emitters consume.
//!
//! # Architecture
//!
//! ```text
//! Introspect / gqlschema.toml → builder (walk) → SchemaGraph (this crate) → emitter
//! ```
//!
//! The model is plain data:
//! - no knowledge of how types were discovered;
//! - no target-syntax concerns (no SDL, no JSON schema);
//! - immutable once a build pass has finished.

mod enums;
mod field;
mod graph;
mod record;

pub use enums::{EnumLiteral, EnumType, EnumValue};
pub use field::{ElementKind, FieldDescriptor, FieldShape, TypeRef};
pub use graph::{SchemaGraph, UnresolvedReference};
pub use record::{DictionaryType, RecordType};
