//! SDL rendering of a finished graph.

use gqlschema_ir::{
    DictionaryType, ElementKind, EnumType, FieldDescriptor, FieldShape, RecordType, SchemaGraph,
    TypeRef,
};

use crate::{CodeBuilder, Indent};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    pub indent: Indent,
    /// Emit `"..."` description lines.
    pub descriptions: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            descriptions: true,
        }
    }
}

/// Render `graph` as SDL: enums, then records, then dictionaries, each in
/// registration order.
///
/// Only fields marked for output are rendered, under their external names.
/// Records left without such fields are skipped.
pub fn render(graph: &SchemaGraph, options: &EmitOptions) -> String {
    let mut blocks: Vec<String> = Vec::new();

    blocks.extend(graph.enums().map(|e| render_enum(e, options)));
    blocks.extend(
        graph
            .records()
            .filter(|r| r.visible_fields().next().is_some())
            .map(|r| render_record(r, options)),
    );
    blocks.extend(graph.dictionaries().map(|d| render_dictionary(d, options)));

    blocks.join("\n")
}

fn render_enum(enum_type: &EnumType, options: &EmitOptions) -> String {
    let builder = CodeBuilder::new(options.indent);
    // A placeholder has no values to list.
    if enum_type.is_placeholder() {
        return builder.line(&format!("enum {}", enum_type.name)).build();
    }

    builder
        .block_with_close(&format!("enum {} {{", enum_type.name), "}", |b| {
            b.each(&enum_type.values, |b, value| {
                b.when(options.descriptions, |b| match &value.description {
                    Some(description) => b.description(description),
                    None => b,
                })
                .line(&value.key)
            })
        })
        .build()
}

fn render_record(record: &RecordType, options: &EmitOptions) -> String {
    CodeBuilder::new(options.indent)
        .block_with_close(&format!("type {} {{", record.name), "}", |b| {
            b.each(record.visible_fields(), |b, field| {
                b.when(options.descriptions, |b| match field.description() {
                    Some(description) => b.description(description),
                    None => b,
                })
                .line(&field_line(field))
            })
        })
        .build()
}

fn render_dictionary(dictionary: &DictionaryType, options: &EmitOptions) -> String {
    let key = type_expression(&dictionary.key.type_name, dictionary.key.shape, false);
    let value = type_ref_expression(&dictionary.value);

    CodeBuilder::new(options.indent)
        .block_with_close(&format!("type {} {{", dictionary.name), "}", |b| {
            b.line(&format!("key: {key}"))
                .line(&format!("value: {value}"))
        })
        .build()
}

fn field_line(field: &FieldDescriptor) -> String {
    let mut line = format!(
        "{}: {}",
        field.name,
        type_expression(&field.declared_type_name, field.shape, field.optional)
    );
    for decorator in field.tag.iter().flat_map(|tag| tag.decorators()) {
        line.push_str(" @");
        line.push_str(&decorator);
    }
    line
}

fn type_ref_expression(ty: &TypeRef) -> String {
    type_expression(&ty.type_name, ty.shape, ty.optional)
}

/// SDL type for a resolved shape. Non-optional types get `!`.
fn type_expression(type_name: &str, shape: FieldShape, optional: bool) -> String {
    let base = match shape {
        FieldShape::List {
            element,
            element_optional,
        } => {
            let inner = element_expression(type_name, element);
            let bang = if element_optional { "" } else { "!" };
            format!("[{inner}{bang}]")
        }
        single => element_expression(type_name, single.element_kind()),
    };
    if optional { base } else { format!("{base}!") }
}

fn element_expression(type_name: &str, kind: ElementKind) -> String {
    match kind {
        ElementKind::Scalar => scalar_name(type_name).to_string(),
        // Dictionaries are rendered as a list of their entries.
        ElementKind::Dictionary => format!("[{type_name}!]"),
        ElementKind::Composite | ElementKind::Enum => type_name.to_string(),
    }
}

/// Map a canonical scalar name to its SDL scalar.
pub fn scalar_name(name: &str) -> &str {
    match name {
        "string" | "char" => "String",
        "bool" => "Boolean",
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => "Int",
        "f32" | "f64" => "Float",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use gqlschema_ir::{EnumValue, TypeRef};
    use gqlschema_tag::Tag;

    use super::*;

    #[test]
    fn test_scalar_name() {
        assert_eq!(scalar_name("string"), "String");
        assert_eq!(scalar_name("u64"), "Int");
        assert_eq!(scalar_name("f32"), "Float");
        assert_eq!(scalar_name("bool"), "Boolean");
        assert_eq!(scalar_name("DateTime"), "DateTime");
    }

    #[test]
    fn test_type_expression() {
        assert_eq!(type_expression("string", FieldShape::Scalar, false), "String!");
        assert_eq!(type_expression("string", FieldShape::Scalar, true), "String");
        assert_eq!(
            type_expression("User", FieldShape::list_of(ElementKind::Composite), false),
            "[User!]!"
        );
        assert_eq!(
            type_expression(
                "i32",
                FieldShape::List {
                    element: ElementKind::Scalar,
                    element_optional: true
                },
                true
            ),
            "[Int]"
        );
        assert_eq!(
            type_expression("ProjectMeta", FieldShape::Dictionary, false),
            "[ProjectMeta!]!"
        );
    }

    #[test]
    fn test_record_with_decorators() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(RecordType::new(
            "User",
            vec![
                FieldDescriptor::new("username", "string", FieldShape::Scalar).with_tag(
                    Tag::new("Username")
                        .with_option("description", "The username")
                        .with_option("decorators", "[+unique(), +length(min: 3)]"),
                ),
                FieldDescriptor::new("password", "string", FieldShape::Scalar).excluded(),
            ],
        ));

        assert_eq!(
            render(&graph, &EmitOptions::default()),
            "type User {\n  \"The username\"\n  username: String! @unique() @length(min: 3)\n}\n"
        );

        let options = EmitOptions {
            descriptions: false,
            ..EmitOptions::default()
        };
        assert_eq!(
            render(&graph, &options),
            "type User {\n  username: String! @unique() @length(min: 3)\n}\n"
        );
    }

    #[test]
    fn test_hidden_records_are_skipped() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(RecordType::new(
            "Secret",
            vec![FieldDescriptor::new("token", "string", FieldShape::Scalar).excluded()],
        ));
        graph.insert_record(RecordType::new("Empty", vec![]));
        assert_eq!(render(&graph, &EmitOptions::default()), "");
    }

    #[test]
    fn test_enums_and_dictionaries() {
        let mut graph = SchemaGraph::new();
        graph.insert_dictionary(DictionaryType::new(
            "Scores",
            TypeRef::scalar("string"),
            TypeRef::scalar("f64").optional(),
        ));
        graph.insert_enum(
            EnumType::new("Roles")
                .with_value(EnumValue::new("USER", 0i64).with_description("A regular user"))
                .with_value(EnumValue::new("ADMIN", 1i64)),
        );
        graph.insert_enum(EnumType::new("Status"));

        assert_eq!(
            render(&graph, &EmitOptions::default()),
            "enum Roles {\n  \"A regular user\"\n  USER\n  ADMIN\n}\n\
             \n\
             enum Status\n\
             \n\
             type Scores {\n  key: String!\n  value: Float\n}\n"
        );
    }
}
