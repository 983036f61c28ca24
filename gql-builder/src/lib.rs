//! Schema graph builder.
//!
//! Walks [`TypeShape`](gqlschema_reflect::TypeShape)s and registers every
//! record, dictionary and enum they reach in a
//! [`SchemaGraph`](gqlschema_ir::SchemaGraph):
//!
//! ```
//! use gqlschema_builder::{BuildContext, SchemaBuilder};
//! use gqlschema_reflect::{FieldInfo, Introspect, TypeShape};
//!
//! struct User;
//!
//! impl Introspect for User {
//!     fn type_shape() -> TypeShape {
//!         TypeShape::record("User", || {
//!             vec![
//!                 FieldInfo::of::<String>("ID").annotate("json", "id"),
//!                 FieldInfo::of::<Vec<User>>("Friends").annotate("json", "friends"),
//!             ]
//!         })
//!     }
//! }
//!
//! let builder = SchemaBuilder::default();
//! let mut ctx = BuildContext::new();
//! builder.add::<User>(&mut ctx).unwrap();
//!
//! let graph = ctx.finish().unwrap();
//! let user = graph.record("User").unwrap();
//! assert_eq!(user.fields[1].declared_type_name, "User");
//! ```
//!
//! A [`SchemaBuilder`] only holds options. All per-pass state lives in the
//! [`BuildContext`], so one builder can serve any number of passes.

mod builder;
mod context;
mod error;
mod naming;
mod options;

pub use builder::SchemaBuilder;
pub use context::BuildContext;
pub use error::{Error, Result};
pub use naming::to_pascal_case;
pub use options::{AnonymousNaming, BuilderOptions};
