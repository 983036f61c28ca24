//! Field descriptors and resolved field shapes.

use gqlschema_tag::Tag;
use serde::Serialize;

/// Kind of the innermost (non-list) type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Scalar,
    Composite,
    Dictionary,
    Enum,
}

impl ElementKind {
    /// Returns true if values of this kind name a graph entry.
    pub fn is_named_entry(&self) -> bool {
        !matches!(self, ElementKind::Scalar)
    }
}

/// Resolved shape of a field, decided once while unwrapping its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldShape {
    Scalar,
    /// A single record value.
    Composite,
    Dictionary,
    Enum,
    /// A repeated value. The element itself is never a list.
    List {
        element: ElementKind,
        element_optional: bool,
    },
}

impl FieldShape {
    /// A list of non-optional elements.
    pub fn list_of(element: ElementKind) -> Self {
        FieldShape::List {
            element,
            element_optional: false,
        }
    }

    /// The single-value shape for an element kind.
    pub fn single(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Scalar => FieldShape::Scalar,
            ElementKind::Composite => FieldShape::Composite,
            ElementKind::Dictionary => FieldShape::Dictionary,
            ElementKind::Enum => FieldShape::Enum,
        }
    }

    /// Kind of the innermost value.
    pub fn element_kind(&self) -> ElementKind {
        match self {
            FieldShape::Scalar => ElementKind::Scalar,
            FieldShape::Composite => ElementKind::Composite,
            FieldShape::Dictionary => ElementKind::Dictionary,
            FieldShape::Enum => ElementKind::Enum,
            FieldShape::List { element, .. } => *element,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldShape::List { .. })
    }

    /// Returns true if the declared type name refers to a graph entry.
    pub fn references_entry(&self) -> bool {
        self.element_kind().is_named_entry()
    }
}

/// One member of a record, after resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// External name (interchange annotation name or declared field name).
    pub name: String,
    /// Scalar canonical name, or the name of a record, dictionary or enum.
    pub declared_type_name: String,
    pub shape: FieldShape,
    /// The outermost layer was optional.
    pub optional: bool,
    /// False for non-public or suppressed fields. Emitters drop these.
    pub include_in_output: bool,
    pub tag: Option<Tag>,
}

impl FieldDescriptor {
    /// Create a visible, required field with no tag.
    pub fn new(
        name: impl Into<String>,
        declared_type_name: impl Into<String>,
        shape: FieldShape,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type_name: declared_type_name.into(),
            shape,
            optional: false,
            include_in_output: true,
            tag: None,
        }
    }

    /// Mark the field optional (builder style).
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Exclude the field from output (builder style).
    pub fn excluded(mut self) -> Self {
        self.include_in_output = false;
        self
    }

    /// Attach a parsed tag (builder style).
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn is_list(&self) -> bool {
        self.shape.is_list()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True only for a single record value; a list of records is not composite.
    pub fn is_composite(&self) -> bool {
        self.shape == FieldShape::Composite
    }

    pub fn is_dictionary(&self) -> bool {
        self.shape == FieldShape::Dictionary
    }

    pub fn is_enum(&self) -> bool {
        self.shape == FieldShape::Enum
    }

    /// Description from the tag, if any.
    pub fn description(&self) -> Option<&str> {
        self.tag.as_ref().and_then(Tag::description)
    }
}

/// Field-like type information used for dictionary keys and values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub type_name: String,
    pub shape: FieldShape,
    pub optional: bool,
}

impl TypeRef {
    /// A required scalar.
    pub fn scalar(type_name: impl Into<String>) -> Self {
        Self::new(type_name, FieldShape::Scalar)
    }

    pub fn new(type_name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            type_name: type_name.into(),
            shape,
            optional: false,
        }
    }

    /// Mark the type optional (builder style).
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
