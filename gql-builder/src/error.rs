use miette::Diagnostic;
use thiserror::Error;

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum Error {
    #[error("'{found}' is not a record")]
    #[diagnostic(
        code(gql::not_a_record),
        help("add_record expects a record type, optionally behind Option")
    )]
    NotARecord { found: String },

    #[error("'{found}' is not a dictionary")]
    #[diagnostic(
        code(gql::not_a_dictionary),
        help("add_dictionary expects a map type, optionally behind Option")
    )]
    NotADictionary { found: String },

    #[error("cannot add an anonymous record without a name")]
    #[diagnostic(
        code(gql::anonymous_root),
        help("pass a name override to add_record")
    )]
    AnonymousRoot,

    #[error("unsupported type '{found}' for '{owner}.{member}': {reason}")]
    #[diagnostic(code(gql::unsupported_shape))]
    UnsupportedShape {
        owner: String,
        member: String,
        found: String,
        reason: String,
    },

    #[error("enum '{name}' is already defined with different values")]
    #[diagnostic(
        code(gql::conflicting_enum),
        help("each enum's values may only be supplied once")
    )]
    ConflictingEnum { name: String },

    #[error("records still pending after the walk: {}", pending.join(", "))]
    #[diagnostic(code(gql::pending_not_empty))]
    PendingNotEmpty { pending: Vec<String> },

    #[error("'{owner}.{member}' refers to '{type_name}', which is not in the graph")]
    #[diagnostic(code(gql::unresolved_reference))]
    UnresolvedReference {
        owner: String,
        member: String,
        type_name: String,
    },

    #[error("the build context was aborted by an earlier error")]
    #[diagnostic(
        code(gql::aborted),
        help("start a new pass with a fresh BuildContext")
    )]
    Aborted,
}

impl Error {
    pub(crate) fn unsupported(
        owner: &str,
        member: &str,
        found: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::UnsupportedShape {
            owner: owner.to_string(),
            member: member.to_string(),
            found: found.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::PendingNotEmpty {
            pending: vec!["User".into(), "Project".into()],
        };
        assert_eq!(
            err.to_string(),
            "records still pending after the walk: User, Project"
        );

        let err = Error::unsupported("User", "grid", "Vec<Vec<i32>>", "lists of lists are not supported");
        assert_eq!(
            err.to_string(),
            "unsupported type 'Vec<Vec<i32>>' for 'User.grid': lists of lists are not supported"
        );
    }
}
