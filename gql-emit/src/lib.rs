//! GraphQL SDL emitter for gqlschema type graphs.
//!
//! [`render`] turns a finished [`SchemaGraph`](gqlschema_ir::SchemaGraph)
//! into SDL text. Dictionaries have no SDL counterpart, so each one becomes an
//! entry type with `key` and `value` fields and is referenced as a list of
//! entries.
//!
//! ```
//! use gqlschema_emit::{EmitOptions, render};
//! use gqlschema_ir::{FieldDescriptor, FieldShape, RecordType, SchemaGraph};
//!
//! let mut graph = SchemaGraph::new();
//! graph.insert_record(RecordType::new(
//!     "User",
//!     vec![FieldDescriptor::new("id", "string", FieldShape::Scalar)],
//! ));
//!
//! assert_eq!(render(&graph, &EmitOptions::default()), "type User {\n  id: String!\n}\n");
//! ```

mod code_builder;
mod render;

pub use code_builder::{CodeBuilder, Indent};
pub use render::{EmitOptions, render, scalar_name};
