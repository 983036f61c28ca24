use serde::{Deserialize, Serialize};

/// How anonymous records nested in a record are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnonymousNaming {
    /// `<Owner>_<Field>`, e.g. `UserDocument_Meta`.
    #[default]
    Underscore,
    /// `<Owner>Struct<n>`, numbering the owner's anonymous records from 1.
    Indexed,
}

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Annotation key holding the schema tag.
    pub schema_tag: String,
    /// Annotation key holding the interchange name.
    pub interchange_tag: String,
    pub anonymous_naming: AnonymousNaming,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            schema_tag: "graphql".to_string(),
            interchange_tag: "json".to_string(),
            anonymous_naming: AnonymousNaming::default(),
        }
    }
}
