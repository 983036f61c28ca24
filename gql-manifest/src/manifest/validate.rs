//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;

use super::{FieldDef, Manifest};
use crate::{Catalog, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source for error reporting and the current path through the
/// manifest (e.g. `["User", "Meta"]` for an inline record's fields).
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "gqlschema.toml");
/// ctx.validate_name("User", "record")?;
///
/// let nested = ctx.push("User");
/// nested.validate_name("Email", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self::from_source(SourceContext::new(src, filename))
    }

    pub fn from_source(source: SourceContext) -> Self {
        Self {
            source: Arc::new(source),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// The current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// A context description for error messages, e.g. `field in 'User.Meta'`.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a table name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src(), name)
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_value_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src(), value)
    }

    /// Validate that a name is a valid schema identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }

    /// Validate names and cross-references of a parsed manifest.
    pub fn validate_manifest(&self, manifest: &'a Manifest) -> Result<()> {
        for (name, record) in &manifest.records {
            self.validate_name(name, "record")?;
            self.push(name).validate_fields(&record.fields)?;
        }

        for (name, enum_def) in &manifest.enums {
            self.validate_name(name, "enum")?;
            if manifest.records.contains_key(name) {
                return Err(self.source.duplicate_type_error(
                    name,
                    "a record",
                    "an enum",
                    find_table_span(self.src(), "enums", name),
                ));
            }

            let values = self.push(name);
            let mut keys = HashSet::new();
            for value in &enum_def.values {
                values.validate_name(&value.key, "enum value")?;
                if !keys.insert(value.key.as_str()) {
                    return Err(self.source.validation_error(
                        format!("duplicate value '{}' in enum '{name}'", value.key),
                        self.find_value_span(&value.key),
                    ));
                }
            }
        }

        for name in manifest.schema.dictionaries.keys() {
            self.validate_name(name, "dictionary")?;
            let first_kind = if manifest.records.contains_key(name) {
                Some("a record")
            } else if manifest.enums.contains_key(name) {
                Some("an enum")
            } else {
                None
            };
            if let Some(first_kind) = first_kind {
                return Err(self.source.duplicate_type_error(
                    name,
                    first_kind,
                    "a dictionary",
                    self.find_span(name),
                ));
            }
        }

        for root in &manifest.schema.roots {
            if !manifest.records.contains_key(root) {
                return Err(self
                    .source
                    .unknown_root_error(root, self.find_value_span(root)));
            }
        }

        // Type expressions and references are checked while resolving.
        Catalog::new(manifest, self)?;
        Ok(())
    }

    fn validate_fields(&self, fields: &'a [FieldDef]) -> Result<()> {
        let mut names = HashSet::new();
        for field in fields {
            self.validate_name(&field.name, "field")?;
            if !names.insert(field.name.as_str()) {
                return Err(self.source.validation_error(
                    format!(
                        "duplicate field '{}' in '{}'",
                        field.name,
                        self.path_string()
                    ),
                    self.find_value_span(&field.name),
                ));
            }
            if let Some(inline) = &field.fields {
                self.push(&field.name).validate_fields(inline)?;
            }
        }
        Ok(())
    }
}

/// Find the span of a name in the TOML source.
///
/// Searches for patterns like `.name]`, `.name.`, or `.name =`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!(".{}]", name), // [records.name]
        format!(".{}.", name), // [[records.name.fields]]
        format!(".{} ", name), // inline: name = { ... }
        format!(".{}=", name), // inline without space: name={ ... }
        format!("\n{} =", name), // key in a table: name = "..."
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot or newline
            let start = pos + 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    // Fallback: just find the name anywhere (less precise)
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Find the span of `name` in a `[table.name...]` header.
pub(crate) fn find_table_span(src: &str, table: &str, name: &str) -> Option<SourceSpan> {
    let prefix = format!("{table}.{name}");
    src.find(&prefix)
        .map(|pos| SourceSpan::from((pos + table.len() + 1, name.len())))
        .or_else(|| find_name_span(src, name))
}

/// Find the span of the contents of a `"value"` string in the TOML source.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{value}\"");
    src.find(&quoted)
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

/// Validate that a name is a schema identifier (`[_A-Za-z][_0-9A-Za-z]*`).
///
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    if name.starts_with("__") {
        return Some("names starting with '__' are reserved for introspection");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("User").is_none());
        assert!(validate_identifier("UserDocument_Meta").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("ID").is_none());
        assert!(validate_identifier("field2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("my-type").is_some());
        assert!(validate_identifier("hello world").is_some());
        assert!(validate_identifier("__Type").is_some());
    }

    #[test]
    fn test_find_name_span() {
        let src = "[[records.User.fields]]\nname = \"ID\"";
        let span = find_name_span(src, "User").unwrap();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_find_table_span() {
        let src = "[[records.Roles.fields]]\n[[enums.Roles.values]]";
        let span = find_table_span(src, "enums", "Roles").unwrap();
        assert_eq!(span.offset(), 33);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_value_span() {
        let src = "name = \"Email\"\ntype = \"Option<String>\"";
        let span = find_value_span(src, "Option<String>").unwrap();
        assert_eq!(span.offset(), 23);
        assert_eq!(span.len(), 14);
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "gqlschema.toml");
        let nested = ctx.push("UserDocument").push("Meta");
        assert_eq!(nested.path_string(), "UserDocument.Meta");
        assert_eq!(nested.context_for("field"), "field in 'UserDocument.Meta'");
        assert_eq!(ctx.context_for("record"), "record");
    }

    #[test]
    fn test_parse_context_validate_name() {
        let ctx = ParseContext::new("[records.1st]", "gqlschema.toml");
        let err = ctx.validate_name("1st", "record").unwrap_err();
        assert_eq!(err.to_string(), "invalid record name '1st'");
        assert!(ctx.validate_name("User", "record").is_ok());
    }
}
