//! The recursive type walk.

use gqlschema_ir::{
    DictionaryType, ElementKind, EnumType, FieldDescriptor, FieldShape, RecordType, TypeRef,
};
use gqlschema_reflect::{FieldInfo, Introspect, RecordRef, TypeShape};
use gqlschema_tag::{SUPPRESS_MARKER, TargetType, parse_interchange, parse_tag};
use tracing::{debug, instrument, trace};

use crate::{BuildContext, BuilderOptions, Error, Result, naming};

/// Builds schema graphs. Holds only options; all pass state lives in a
/// [`BuildContext`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    options: BuilderOptions,
}

/// Where a type is being resolved, and what to call it if it has no name.
struct Site<'a> {
    owner: &'a str,
    member: &'a str,
    anonymous_record: String,
    dictionary: String,
    depth: usize,
}

impl SchemaBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Register a record and everything it reaches.
    ///
    /// `name_override` replaces the record's own name and is required for
    /// anonymous records. Adding a name that is pending or complete is a
    /// no-op.
    #[instrument(level = "debug", skip(self, ctx, shape))]
    pub fn add_record(
        &self,
        ctx: &mut BuildContext,
        shape: &TypeShape,
        name_override: Option<&str>,
    ) -> Result<()> {
        ctx.ensure_active()?;
        let result = self.add_root_record(ctx, shape, name_override);
        ctx.settle(result)
    }

    /// Register a dictionary under `name` and everything its values reach.
    ///
    /// An empty name becomes `Map0`.
    #[instrument(level = "debug", skip(self, ctx, shape))]
    pub fn add_dictionary(
        &self,
        ctx: &mut BuildContext,
        name: &str,
        shape: &TypeShape,
    ) -> Result<()> {
        ctx.ensure_active()?;
        let result = match shape.without_optional() {
            TypeShape::Dictionary { key, value } => {
                let name = if name.is_empty() {
                    naming::unnamed_dictionary(0)
                } else {
                    name.to_string()
                };
                self.register_dictionary(ctx, &name, key, value, 0)
            }
            other => Err(Error::NotADictionary {
                found: other.to_string(),
            }),
        };
        ctx.settle(result)
    }

    /// Supply the values of an enum.
    ///
    /// Fills a placeholder registered during the walk. Supplying the same
    /// values twice is a no-op; different values are a conflict.
    #[instrument(level = "debug", skip(self, ctx, enum_type), fields(name = %enum_type.name))]
    pub fn add_enum(&self, ctx: &mut BuildContext, enum_type: EnumType) -> Result<()> {
        ctx.ensure_active()?;
        let result = match ctx.graph.enum_type_mut(&enum_type.name) {
            Some(existing) if existing.is_placeholder() => {
                debug!(name = %enum_type.name, values = enum_type.values.len(), "filled enum");
                existing.values = enum_type.values;
                Ok(())
            }
            Some(existing) if *existing == enum_type => {
                trace!(name = %enum_type.name, "enum already defined");
                Ok(())
            }
            Some(_) => Err(Error::ConflictingEnum {
                name: enum_type.name,
            }),
            None => {
                debug!(name = %enum_type.name, values = enum_type.values.len(), "registered enum");
                ctx.graph.insert_enum(enum_type);
                Ok(())
            }
        };
        ctx.settle(result)
    }

    /// Register `T` and everything it reaches.
    pub fn add<T: Introspect + ?Sized>(&self, ctx: &mut BuildContext) -> Result<()> {
        self.add_record(ctx, &T::type_shape(), None)
    }

    /// Run a complete pass rooted at `T`.
    pub fn build<T: Introspect + ?Sized>(&self) -> Result<gqlschema_ir::SchemaGraph> {
        let mut ctx = BuildContext::new();
        self.add::<T>(&mut ctx)?;
        ctx.finish()
    }

    fn add_root_record(
        &self,
        ctx: &mut BuildContext,
        shape: &TypeShape,
        name_override: Option<&str>,
    ) -> Result<()> {
        let TypeShape::Record(record) = shape.without_optional() else {
            return Err(Error::NotARecord {
                found: shape.to_string(),
            });
        };
        let name = name_override
            .or(record.name())
            .filter(|name| !name.is_empty())
            .ok_or(Error::AnonymousRoot)?;
        self.walk_record(ctx, record, name)
    }

    fn walk_record(&self, ctx: &mut BuildContext, record: &RecordRef, name: &str) -> Result<()> {
        if ctx.graph.contains_record(name) || ctx.pending.contains(name) {
            trace!(record = name, "record already known");
            return Ok(());
        }
        ctx.pending.insert(name.to_string());
        trace!(record = name, "walking record");

        let mut fields = Vec::new();
        let mut anonymous = 0;
        for info in record.fields() {
            if is_anonymous_record(&info.shape) {
                anonymous += 1;
            }
            let site = Site {
                owner: name,
                member: &info.name,
                anonymous_record: naming::anonymous_record(
                    self.options.anonymous_naming,
                    name,
                    &info.name,
                    anonymous,
                ),
                dictionary: naming::field_dictionary(name, &info.name),
                depth: 0,
            };
            fields.push(self.resolve_field(ctx, &site, &info)?);
        }

        ctx.pending.shift_remove(name);
        ctx.graph.insert_record(RecordType::new(name, fields));
        debug!(record = name, "registered record");
        Ok(())
    }

    fn resolve_field(
        &self,
        ctx: &mut BuildContext,
        site: &Site<'_>,
        info: &FieldInfo,
    ) -> Result<FieldDescriptor> {
        let interchange_raw = info.annotation(&self.options.interchange_tag);
        let schema_raw = info.annotation(&self.options.schema_tag);
        let interchange = parse_interchange(interchange_raw).unwrap_or_default();

        let mut resolved = self.resolve(ctx, site, &info.shape)?;
        if resolved.shape == FieldShape::Scalar && interchange.target == Some(TargetType::String) {
            resolved.type_name = "string".to_string();
        }

        let name = interchange
            .name
            .filter(|name| !name.is_empty() && name != SUPPRESS_MARKER)
            .unwrap_or_else(|| info.name.clone());
        let include_in_output =
            info.public && !interchange.private && schema_raw != SUPPRESS_MARKER;

        Ok(FieldDescriptor {
            name,
            declared_type_name: resolved.type_name,
            shape: resolved.shape,
            optional: resolved.optional,
            include_in_output,
            tag: parse_tag(schema_raw, &info.name),
        })
    }

    /// Unwrap optional, then list, then resolve the base type.
    fn resolve(&self, ctx: &mut BuildContext, site: &Site<'_>, shape: &TypeShape) -> Result<TypeRef> {
        let optional = matches!(shape, TypeShape::Optional(_));
        let shape = shape.without_optional();

        let (type_name, shape) = match shape {
            TypeShape::List(element) => {
                let element_optional = matches!(**element, TypeShape::Optional(_));
                let base = element.without_optional();
                if matches!(base, TypeShape::List(_)) {
                    return Err(Error::unsupported(
                        site.owner,
                        site.member,
                        shape,
                        "lists of lists are not supported",
                    ));
                }
                let (type_name, element) = self.resolve_base(ctx, site, base)?;
                (
                    type_name,
                    FieldShape::List {
                        element,
                        element_optional,
                    },
                )
            }
            base => {
                let (type_name, kind) = self.resolve_base(ctx, site, base)?;
                (type_name, FieldShape::single(kind))
            }
        };

        Ok(TypeRef {
            type_name,
            shape,
            optional,
        })
    }

    fn resolve_base(
        &self,
        ctx: &mut BuildContext,
        site: &Site<'_>,
        shape: &TypeShape,
    ) -> Result<(String, ElementKind)> {
        match shape {
            TypeShape::Scalar(kind) => Ok((kind.as_str().to_string(), ElementKind::Scalar)),
            TypeShape::Enum(name) => {
                if ctx.graph.insert_enum(EnumType::new(name.as_str())) {
                    debug!(name = %name, "registered enum placeholder");
                }
                Ok((name.clone(), ElementKind::Enum))
            }
            TypeShape::Record(record) => {
                let name = record
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| site.anonymous_record.clone());
                self.walk_record(ctx, record, &name)?;
                Ok((name, ElementKind::Composite))
            }
            TypeShape::Dictionary { key, value } => {
                self.register_dictionary(ctx, &site.dictionary, key, value, site.depth)?;
                Ok((site.dictionary.clone(), ElementKind::Dictionary))
            }
            TypeShape::Optional(inner) => self.resolve_base(ctx, site, inner),
            TypeShape::List(_) => Err(Error::unsupported(
                site.owner,
                site.member,
                shape,
                "lists of lists are not supported",
            )),
        }
    }

    fn register_dictionary(
        &self,
        ctx: &mut BuildContext,
        name: &str,
        key: &TypeShape,
        value: &TypeShape,
        depth: usize,
    ) -> Result<()> {
        if ctx.graph.contains_dictionary(name) {
            trace!(dictionary = name, "dictionary already known");
            return Ok(());
        }

        let key_site = Site {
            owner: name,
            member: "key",
            anonymous_record: String::new(),
            dictionary: String::new(),
            depth,
        };
        let key = match key.without_optional() {
            TypeShape::Scalar(_) | TypeShape::Enum(_) => self.resolve(ctx, &key_site, key)?,
            other => {
                return Err(Error::unsupported(
                    name,
                    "key",
                    other,
                    "dictionary keys must be scalars",
                ));
            }
        };

        let value_site = Site {
            owner: name,
            member: "value",
            anonymous_record: naming::dictionary_record(name, depth + 1),
            dictionary: naming::nested_dictionary(name, depth + 1),
            depth: depth + 1,
        };
        let value = self.resolve(ctx, &value_site, value)?;

        ctx.graph
            .insert_dictionary(DictionaryType::new(name, key, value));
        debug!(dictionary = name, depth, "registered dictionary");
        Ok(())
    }
}

fn is_anonymous_record(shape: &TypeShape) -> bool {
    let base = match shape.without_optional() {
        TypeShape::List(element) => element.without_optional(),
        other => other,
    };
    matches!(base, TypeShape::Record(record) if record.name().is_none())
}
