//! Type manifest for gqlschema.
//!
//! A `gqlschema.toml` file declares records, enums and standalone
//! dictionaries explicitly, plus the build settings under `[schema]`:
//!
//! ```toml
//! [schema]
//! roots = ["User"]
//!
//! [[records.User.fields]]
//! name = "ID"
//! type = "String"
//! tags = { json = "id", graphql = "description=The ID of the user" }
//! ```
//!
//! [`Manifest::catalog`] resolves the declarations into shapes the schema
//! builder can walk.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod catalog;
mod error;
mod manifest;
mod type_expr;

pub use catalog::Catalog;
pub use error::{Error, Result, SourceContext};
pub use manifest::*;
pub use type_expr::{INLINE_RECORD, TypeExpr, TypeExprError};
