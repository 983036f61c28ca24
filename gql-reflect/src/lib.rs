//! Type introspection for gqlschema.
//!
//! Rust has no runtime reflection, so types describe themselves: a
//! [`TypeShape`] says whether a type is a scalar, an enum, an optional, a
//! list, a dictionary or a record, and a record lists its [`FieldInfo`]s in
//! declaration order together with their raw annotation strings.
//!
//! Two sources produce shapes:
//! - the [`Introspect`] trait, implemented here for std types and by hand for
//!   application records;
//! - an explicit description such as a parsed type manifest.
//!
//! Record fields are produced lazily through [`RecordRef`], so a type that
//! refers to itself (directly or through other records) can be described
//! without recursing forever.

mod field;
mod introspect;
mod record;
mod shape;

pub use field::FieldInfo;
pub use introspect::Introspect;
pub use record::RecordRef;
pub use shape::{ScalarKind, TypeShape};
