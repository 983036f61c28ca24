//! Enumerated scalar domains.

use std::fmt;

use serde::Serialize;

/// A named scalar domain with an enumerated value set.
///
/// Enums discovered while walking fields are registered with no values:
/// a scalar-typed field does not reveal its symbolic constants. Values are
/// supplied separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<EnumValue>,
}

impl EnumType {
    /// Create an enum with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value (builder style).
    pub fn with_value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }

    /// Returns true if no values have been supplied yet.
    pub fn is_placeholder(&self) -> bool {
        self.values.is_empty()
    }
}

/// One enumerated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    /// Symbolic name (e.g. `ADMIN`).
    pub key: String,
    pub value: EnumLiteral,
    pub description: Option<String>,
}

impl EnumValue {
    pub fn new(key: impl Into<String>, value: impl Into<EnumLiteral>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Literal value behind an enum key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for EnumLiteral {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumLiteral {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for EnumLiteral {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for EnumLiteral {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for EnumLiteral {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let roles = EnumType::new("Roles");
        assert!(roles.is_placeholder());

        let roles = roles.with_value(EnumValue::new("USER", 0i64));
        assert!(!roles.is_placeholder());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(EnumLiteral::from("admin").to_string(), "admin");
        assert_eq!(EnumLiteral::from(42i64).to_string(), "42");
        assert_eq!(EnumLiteral::from(true).to_string(), "true");
        assert_eq!(EnumLiteral::from(1.5f64).to_string(), "1.5");
    }

    #[test]
    fn test_value_description() {
        let value = EnumValue::new("ADMIN", "admin").with_description("Full access");
        assert_eq!(value.description.as_deref(), Some("Full access"));
        assert_eq!(value.value, EnumLiteral::String("admin".into()));
    }
}
