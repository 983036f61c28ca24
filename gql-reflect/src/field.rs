//! Field metadata.

use indexmap::IndexMap;

use crate::{Introspect, TypeShape};

/// One declared field of a record.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Declared field name.
    pub name: String,
    pub shape: TypeShape,
    /// False for fields that are not part of the type's public surface.
    pub public: bool,
    /// Raw annotation strings by key (e.g. `json`, `graphql`).
    pub annotations: IndexMap<String, String>,
}

impl FieldInfo {
    /// A public, unannotated field.
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            public: true,
            annotations: IndexMap::new(),
        }
    }

    /// A field whose shape comes from an [`Introspect`] type.
    pub fn of<T: Introspect + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::type_shape())
    }

    /// Attach a raw annotation (builder style).
    pub fn annotate(mut self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), raw.into());
        self
    }

    /// Mark the field non-public (builder style).
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Raw annotation for `key`; empty when absent.
    pub fn annotation(&self, key: &str) -> &str {
        self.annotations.get(key).map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations() {
        let field = FieldInfo::of::<String>("Email")
            .annotate("json", "email")
            .annotate("graphql", "description=The email of the user");

        assert!(field.public);
        assert_eq!(field.annotation("json"), "email");
        assert_eq!(field.annotation("yaml"), "");
    }

    #[test]
    fn test_private() {
        let field = FieldInfo::of::<String>("password").private();
        assert!(!field.public);
    }
}
