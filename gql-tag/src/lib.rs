//! Field annotation parsing for gqlschema.
//!
//! Fields carry two kinds of free-form annotation strings:
//!
//! - the **schema annotation** (`graphql` by default), a comma-separated
//!   key=value micro-language parsed by [`parse_tag`] into a [`Tag`];
//! - the **interchange annotation** (`json` by default), which names the field
//!   on the wire and may suppress it, parsed by [`parse_interchange`].
//!
//! ```text
//! username, description=The username of the user, decorators=[+unique()]
//! ```
//!
//! Neither parser reports errors: malformed input degrades to literal content.

mod interchange;
mod tag;

pub use interchange::{InterchangeTag, TargetType, parse_interchange};
pub use tag::{SUPPRESS_MARKER, Tag, parse_tag};
