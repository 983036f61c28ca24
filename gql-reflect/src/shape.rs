//! Type shapes.

use std::fmt;

use crate::{FieldInfo, RecordRef};

/// Terminal scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Char,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl ScalarKind {
    /// Canonical scalar name carried by field descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Char => "char",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }

    /// Look up a scalar by canonical or Rust type name (`String`, `str`, `i32`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" | "String" | "str" => ScalarKind::String,
            "char" => ScalarKind::Char,
            "bool" => ScalarKind::Bool,
            "i8" => ScalarKind::I8,
            "i16" => ScalarKind::I16,
            "i32" => ScalarKind::I32,
            "i64" => ScalarKind::I64,
            "i128" => ScalarKind::I128,
            "isize" => ScalarKind::Isize,
            "u8" => ScalarKind::U8,
            "u16" => ScalarKind::U16,
            "u32" => ScalarKind::U32,
            "u64" => ScalarKind::U64,
            "u128" => ScalarKind::U128,
            "usize" => ScalarKind::Usize,
            "f32" => ScalarKind::F32,
            "f64" => ScalarKind::F64,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            ScalarKind::String | ScalarKind::Char | ScalarKind::Bool | ScalarKind::F32 | ScalarKind::F64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ScalarKind::F32 | ScalarKind::F64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural description of a type, as seen by the schema graph builder.
#[derive(Debug, Clone)]
pub enum TypeShape {
    Scalar(ScalarKind),
    /// A named scalar domain with enumerated values.
    Enum(String),
    /// Nullable / pointer layer.
    Optional(Box<TypeShape>),
    /// Repeated values.
    List(Box<TypeShape>),
    Dictionary {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
    Record(RecordRef),
}

impl TypeShape {
    pub fn optional(inner: TypeShape) -> Self {
        TypeShape::Optional(Box::new(inner))
    }

    pub fn list(element: TypeShape) -> Self {
        TypeShape::List(Box::new(element))
    }

    pub fn dictionary(key: TypeShape, value: TypeShape) -> Self {
        TypeShape::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeShape::Enum(name.into())
    }

    /// A named record whose fields are produced on demand.
    pub fn record<F>(name: impl Into<String>, fields: F) -> Self
    where
        F: Fn() -> Vec<FieldInfo> + Send + Sync + 'static,
    {
        TypeShape::Record(RecordRef::named(name, fields))
    }

    /// A record with no intrinsic name (an inline nested record).
    pub fn anonymous_record<F>(fields: F) -> Self
    where
        F: Fn() -> Vec<FieldInfo> + Send + Sync + 'static,
    {
        TypeShape::Record(RecordRef::anonymous(fields))
    }

    /// Strip every optional layer.
    pub fn without_optional(&self) -> &TypeShape {
        let mut shape = self;
        while let TypeShape::Optional(inner) = shape {
            shape = inner;
        }
        shape
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeShape::Scalar(_) => "scalar",
            TypeShape::Enum(_) => "enum",
            TypeShape::Optional(_) => "optional",
            TypeShape::List(_) => "list",
            TypeShape::Dictionary { .. } => "dictionary",
            TypeShape::Record(_) => "record",
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Scalar(kind) => write!(f, "{kind}"),
            TypeShape::Enum(name) => f.write_str(name),
            TypeShape::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeShape::List(inner) => write!(f, "Vec<{inner}>"),
            TypeShape::Dictionary { key, value } => write!(f, "Map<{key}, {value}>"),
            TypeShape::Record(record) => f.write_str(record.name().unwrap_or("<anonymous record>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_names_round_trip() {
        for kind in [
            ScalarKind::String,
            ScalarKind::Bool,
            ScalarKind::I32,
            ScalarKind::U64,
            ScalarKind::F64,
        ] {
            assert_eq!(ScalarKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ScalarKind::from_name("String"), Some(ScalarKind::String));
        assert_eq!(ScalarKind::from_name("User"), None);
    }

    #[test]
    fn test_scalar_classes() {
        assert!(ScalarKind::I64.is_integer());
        assert!(ScalarKind::Usize.is_integer());
        assert!(!ScalarKind::F32.is_integer());
        assert!(ScalarKind::F32.is_float());
        assert!(!ScalarKind::Bool.is_integer());
    }

    #[test]
    fn test_display() {
        let shape = TypeShape::optional(TypeShape::dictionary(
            TypeShape::Scalar(ScalarKind::String),
            TypeShape::list(TypeShape::record("User", Vec::new)),
        ));
        assert_eq!(shape.to_string(), "Option<Map<string, Vec<User>>>");
    }

    #[test]
    fn test_without_optional() {
        let shape = TypeShape::optional(TypeShape::optional(TypeShape::Scalar(ScalarKind::Bool)));
        assert!(matches!(
            shape.without_optional(),
            TypeShape::Scalar(ScalarKind::Bool)
        ));
        assert_eq!(shape.kind_name(), "optional");
    }
}
