//! Manifest types and parsing for gqlschema.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::GqlToml;
use gqlschema_builder::{AnonymousNaming, BuilderOptions};
use gqlschema_ir::{EnumLiteral, EnumType, EnumValue};
use indexmap::IndexMap;
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{Catalog, Result, error::SourceContext};

/// Root manifest for gqlschema.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Build settings
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Record declarations, in file order
    #[serde(default)]
    pub records: IndexMap<String, RecordDef>,

    /// Enum declarations, in file order
    #[serde(default)]
    pub enums: IndexMap<String, EnumDef>,

    #[serde(skip)]
    source: SourceContext,
}

/// The `[schema]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Records to build from. Empty means every declared record.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Default output path for `gql build`
    pub output: Option<PathBuf>,

    #[serde(default = "default_schema_tag")]
    pub schema_tag: String,

    #[serde(default = "default_interchange_tag")]
    pub interchange_tag: String,

    #[serde(default)]
    pub anonymous_naming: AnonymousNaming,

    /// Standalone dictionaries: name to `Map<K, V>` expression
    #[serde(default)]
    pub dictionaries: IndexMap<String, String>,
}

fn default_schema_tag() -> String {
    BuilderOptions::default().schema_tag
}

fn default_interchange_tag() -> String {
    BuilderOptions::default().interchange_tag
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            output: None,
            schema_tag: default_schema_tag(),
            interchange_tag: default_interchange_tag(),
            anonymous_naming: AnonymousNaming::default(),
            dictionaries: IndexMap::new(),
        }
    }
}

/// A `[records.<Name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDef {
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One `[[records.<Name>.fields]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,

    /// Type expression, e.g. `Option<Vec<User>>` or `_`
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default = "default_public")]
    pub public: bool,

    /// Raw annotations by key (`json`, `graphql`, ...)
    #[serde(default)]
    pub tags: IndexMap<String, String>,

    /// Fields of an inline record (`type = "_"`)
    pub fields: Option<Vec<FieldDef>>,
}

fn default_public() -> bool {
    true
}

/// A `[enums.<Name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDef {
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

/// One `[[enums.<Name>.values]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValueDef {
    pub key: String,
    /// Defaults to the key.
    pub value: Option<LiteralDef>,
    pub description: Option<String>,
}

/// A TOML scalar used as an enum value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralDef {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<LiteralDef> for EnumLiteral {
    fn from(value: LiteralDef) -> Self {
        match value {
            LiteralDef::Bool(b) => EnumLiteral::Bool(b),
            LiteralDef::Int(i) => EnumLiteral::Int(i),
            LiteralDef::Float(f) => EnumLiteral::Float(f),
            LiteralDef::String(s) => EnumLiteral::String(s),
        }
    }
}

impl EnumDef {
    /// Convert to the graph's enum type.
    pub fn to_enum_type(&self, name: &str) -> EnumType {
        let values = self.values.iter().map(|v| {
            let literal = v
                .value
                .clone()
                .map(EnumLiteral::from)
                .unwrap_or_else(|| EnumLiteral::String(v.key.clone()));
            let value = EnumValue::new(&v.key, literal);
            match &v.description {
                Some(description) => value.with_description(description),
                None => value,
            }
        });
        values.fold(EnumType::new(name), EnumType::with_value)
    }
}

impl Manifest {
    /// Builder options from the `[schema]` table.
    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            schema_tag: self.schema.schema_tag.clone(),
            interchange_tag: self.schema.interchange_tag.clone(),
            anonymous_naming: self.schema.anonymous_naming,
        }
    }

    /// Roots to build from: the configured ones, or every record.
    pub fn roots(&self) -> Vec<&str> {
        if self.schema.roots.is_empty() {
            self.records.keys().map(String::as_str).collect()
        } else {
            self.schema.roots.iter().map(String::as_str).collect()
        }
    }

    /// Resolve every declared type into shapes the builder can walk.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::new(self, &ParseContext::from_source(self.source.clone()))
    }

    /// The source this manifest was parsed from.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }
}
