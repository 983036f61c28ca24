//! Manifest declarations resolved into walkable type shapes.

use std::sync::Arc;

use gqlschema_builder::{BuildContext, SchemaBuilder};
use gqlschema_ir::{EnumType, SchemaGraph};
use gqlschema_reflect::{FieldInfo, ScalarKind, TypeShape};
use indexmap::IndexMap;

use crate::{FieldDef, Manifest, ParseContext, Result, TypeExpr};

/// Resolved declarations of one manifest.
///
/// Cheap to clone. Record shapes produced here read their fields lazily from
/// the shared declarations, so records may refer to each other freely.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<Declarations>,
}

#[derive(Debug)]
struct Declarations {
    records: IndexMap<String, Arc<[FieldSpec]>>,
    dictionaries: IndexMap<String, FieldType>,
    enums: Vec<EnumType>,
    roots: Vec<String>,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    ty: FieldType,
    public: bool,
    tags: IndexMap<String, String>,
}

#[derive(Debug, Clone)]
enum FieldType {
    Scalar(ScalarKind),
    Enum(String),
    Record(String),
    Inline(Arc<[FieldSpec]>),
    Optional(Box<FieldType>),
    List(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
}

impl Catalog {
    /// Resolve every type expression of `manifest`.
    ///
    /// Fails on unparsable expressions, unknown names and `_`/`fields`
    /// mismatches.
    pub fn new(manifest: &Manifest, ctx: &ParseContext<'_>) -> Result<Self> {
        let resolver = Resolver { manifest, ctx };

        let mut records = IndexMap::new();
        for (name, record) in &manifest.records {
            records.insert(name.clone(), resolver.fields(name, &record.fields)?);
        }

        let mut dictionaries = IndexMap::new();
        for (name, raw) in &manifest.schema.dictionaries {
            let context = format!("dictionary '{name}'");
            let expr = resolver.parse(raw, &context)?;
            if !matches!(expr, TypeExpr::Map { .. }) {
                return Err(ctx.source_context().invalid_type_expr_error(
                    raw,
                    context,
                    "expected Map<K, V>",
                    ctx.find_value_span(raw),
                ));
            }
            let ty = resolver.resolve(&expr, raw, &context, None)?;
            dictionaries.insert(name.clone(), ty);
        }

        let enums = manifest
            .enums
            .iter()
            .map(|(name, def)| def.to_enum_type(name))
            .collect();

        Ok(Self {
            inner: Arc::new(Declarations {
                records,
                dictionaries,
                enums,
                roots: manifest.roots().into_iter().map(str::to_string).collect(),
            }),
        })
    }

    /// Shape of a declared record.
    pub fn record_shape(&self, name: &str) -> Option<TypeShape> {
        self.inner
            .records
            .contains_key(name)
            .then(|| record_shape(&self.inner, name))
    }

    /// Shape of a declared standalone dictionary.
    pub fn dictionary_shape(&self, name: &str) -> Option<TypeShape> {
        self.inner
            .dictionaries
            .get(name)
            .map(|ty| to_shape(&self.inner, ty))
    }

    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.inner.records.keys().map(String::as_str)
    }

    pub fn dictionary_names(&self) -> impl Iterator<Item = &str> {
        self.inner.dictionaries.keys().map(String::as_str)
    }

    pub fn enums(&self) -> &[EnumType] {
        &self.inner.enums
    }

    pub fn roots(&self) -> &[String] {
        &self.inner.roots
    }

    /// Add the roots, the standalone dictionaries and the enum values to a
    /// build pass.
    pub fn populate(
        &self,
        builder: &SchemaBuilder,
        ctx: &mut BuildContext,
    ) -> gqlschema_builder::Result<()> {
        for root in &self.inner.roots {
            let shape = record_shape(&self.inner, root);
            builder.add_record(ctx, &shape, None)?;
        }
        for (name, ty) in &self.inner.dictionaries {
            builder.add_dictionary(ctx, name, &to_shape(&self.inner, ty))?;
        }
        for enum_type in &self.inner.enums {
            builder.add_enum(ctx, enum_type.clone())?;
        }
        Ok(())
    }

    /// Run a complete build pass over this catalog.
    pub fn build(&self, builder: &SchemaBuilder) -> gqlschema_builder::Result<SchemaGraph> {
        let mut ctx = BuildContext::new();
        self.populate(builder, &mut ctx)?;
        ctx.finish()
    }
}

fn record_shape(declarations: &Arc<Declarations>, name: &str) -> TypeShape {
    let shared = Arc::clone(declarations);
    let owned = name.to_string();
    TypeShape::record(name, move || {
        shared
            .records
            .get(&owned)
            .map(|fields| field_infos(&shared, fields))
            .unwrap_or_default()
    })
}

fn field_infos(declarations: &Arc<Declarations>, fields: &[FieldSpec]) -> Vec<FieldInfo> {
    fields
        .iter()
        .map(|spec| {
            let mut info = FieldInfo::new(&spec.name, to_shape(declarations, &spec.ty));
            info.public = spec.public;
            info.annotations = spec.tags.clone();
            info
        })
        .collect()
}

fn to_shape(declarations: &Arc<Declarations>, ty: &FieldType) -> TypeShape {
    match ty {
        FieldType::Scalar(kind) => TypeShape::Scalar(*kind),
        FieldType::Enum(name) => TypeShape::enumeration(name),
        FieldType::Record(name) => record_shape(declarations, name),
        FieldType::Inline(fields) => {
            let shared = Arc::clone(declarations);
            let fields = Arc::clone(fields);
            TypeShape::anonymous_record(move || field_infos(&shared, &fields))
        }
        FieldType::Optional(inner) => TypeShape::optional(to_shape(declarations, inner)),
        FieldType::List(inner) => TypeShape::list(to_shape(declarations, inner)),
        FieldType::Map(key, value) => {
            TypeShape::dictionary(to_shape(declarations, key), to_shape(declarations, value))
        }
    }
}

struct Resolver<'m, 'c> {
    manifest: &'m Manifest,
    ctx: &'c ParseContext<'c>,
}

impl Resolver<'_, '_> {
    fn fields(&self, owner: &str, fields: &[FieldDef]) -> Result<Arc<[FieldSpec]>> {
        fields
            .iter()
            .map(|field| {
                let context = format!("field '{owner}.{}'", field.name);
                let expr = self.parse(&field.ty, &context)?;
                let inline = match (&field.fields, expr.contains_inline()) {
                    (Some(inline), true) => {
                        let path = format!("{owner}.{}", field.name);
                        Some(self.fields(&path, inline)?)
                    }
                    (None, false) => None,
                    (Some(_), false) => {
                        return Err(self.ctx.source_context().validation_error(
                            format!("'fields' given for {context}, whose type is not '_'"),
                            self.ctx.find_value_span(&field.name),
                        ));
                    }
                    (None, true) => {
                        return Err(self.ctx.source_context().validation_error(
                            format!("{context} has type '_' but no 'fields'"),
                            self.ctx.find_value_span(&field.ty),
                        ));
                    }
                };
                Ok(FieldSpec {
                    name: field.name.clone(),
                    ty: self.resolve(&expr, &field.ty, &context, inline)?,
                    public: field.public,
                    tags: field.tags.clone(),
                })
            })
            .collect()
    }

    fn parse(&self, raw: &str, context: &str) -> Result<TypeExpr> {
        raw.parse().map_err(|err: crate::TypeExprError| {
            let span = self
                .ctx
                .find_value_span(raw)
                .map(|span| miette::SourceSpan::from((span.offset() + err.offset, 1)));
            self.ctx
                .source_context()
                .invalid_type_expr_error(raw, context, err.message, span)
        })
    }

    fn resolve(
        &self,
        expr: &TypeExpr,
        raw: &str,
        context: &str,
        inline: Option<Arc<[FieldSpec]>>,
    ) -> Result<FieldType> {
        let ty = match expr {
            TypeExpr::Scalar(kind) => FieldType::Scalar(*kind),
            TypeExpr::Named(name) if self.manifest.records.contains_key(name) => {
                FieldType::Record(name.clone())
            }
            TypeExpr::Named(name) if self.manifest.enums.contains_key(name) => {
                FieldType::Enum(name.clone())
            }
            TypeExpr::Named(name) => {
                return Err(self.ctx.source_context().unknown_type_error(
                    name,
                    context,
                    self.ctx.find_value_span(raw),
                ));
            }
            TypeExpr::Inline => match inline {
                Some(fields) => FieldType::Inline(fields),
                None => {
                    return Err(self.ctx.source_context().invalid_type_expr_error(
                        raw,
                        context,
                        "'_' is only allowed in record fields",
                        self.ctx.find_value_span(raw),
                    ));
                }
            },
            TypeExpr::Option(inner) => {
                FieldType::Optional(Box::new(self.resolve(inner, raw, context, inline)?))
            }
            TypeExpr::List(inner) => {
                FieldType::List(Box::new(self.resolve(inner, raw, context, inline)?))
            }
            TypeExpr::Map { key, value } => FieldType::Map(
                Box::new(self.resolve(key, raw, context, inline.clone())?),
                Box::new(self.resolve(value, raw, context, inline)?),
            ),
        };
        Ok(ty)
    }
}
