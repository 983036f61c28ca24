//! Record and dictionary entries.

use serde::Serialize;

use crate::{FieldDescriptor, TypeRef};

/// A composite type with named fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordType {
    /// Declared or synthesized name, unique within a graph.
    pub name: String,
    /// Fields in declaration order, suppressed ones included.
    pub fields: Vec<FieldDescriptor>,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Fields an emitter should render.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.include_in_output)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A keyed collection, registered by name because the target language has no
/// anonymous map type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryType {
    pub name: String,
    pub key: TypeRef,
    pub value: TypeRef,
}

impl DictionaryType {
    pub fn new(name: impl Into<String>, key: TypeRef, value: TypeRef) -> Self {
        Self {
            name: name.into(),
            key,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldShape;

    #[test]
    fn test_visible_fields() {
        let record = RecordType::new(
            "User",
            vec![
                FieldDescriptor::new("id", "string", FieldShape::Scalar),
                FieldDescriptor::new("Password", "string", FieldShape::Scalar).excluded(),
            ],
        );

        let visible: Vec<_> = record.visible_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(visible, vec!["id"]);
        assert_eq!(record.fields.len(), 2);
        assert!(record.field("Password").is_some());
        assert!(record.field("password").is_none());
    }
}
