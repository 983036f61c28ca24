use std::collections::HashMap;

use gqlschema_builder::{BuildContext, SchemaBuilder};
use gqlschema_emit::{EmitOptions, Indent, render};
use gqlschema_ir::{EnumType, EnumValue, SchemaGraph};
use gqlschema_reflect::{FieldInfo, Introspect, TypeShape};

struct Roles;

impl Introspect for Roles {
    fn type_shape() -> TypeShape {
        TypeShape::enumeration("Roles")
    }
}

struct User;

impl Introspect for User {
    fn type_shape() -> TypeShape {
        TypeShape::record("User", || {
            vec![
                FieldInfo::of::<String>("ID")
                    .annotate("json", "id")
                    .annotate("graphql", "description=The ID of the user"),
                FieldInfo::of::<String>("Username")
                    .annotate("json", "username")
                    .annotate(
                        "graphql",
                        "description=The username of the user,decorators=[+unique()]",
                    ),
                FieldInfo::of::<String>("Password")
                    .annotate("json", "-")
                    .annotate("graphql", "-"),
                FieldInfo::of::<Option<String>>("Email")
                    .annotate("json", "email,omitempty")
                    .annotate("graphql", "description=The email of the user"),
                FieldInfo::of::<u32>("Age").annotate("json", "age,string"),
                FieldInfo::of::<Vec<Roles>>("Roles").annotate("json", "roles"),
                FieldInfo::of::<Vec<Project>>("Projects").annotate("json", "projects"),
            ]
        })
    }
}

struct Project;

impl Introspect for Project {
    fn type_shape() -> TypeShape {
        TypeShape::record("Project", || {
            vec![
                FieldInfo::of::<String>("Name").annotate("json", "name"),
                FieldInfo::of::<HashMap<String, String>>("Meta").annotate("json", "meta"),
                FieldInfo::of::<HashMap<String, Option<f64>>>("Scores")
                    .annotate("json", "scores"),
                FieldInfo::of::<Option<User>>("Owner").annotate("json", "owner"),
            ]
        })
    }
}

fn user_graph() -> SchemaGraph {
    let builder = SchemaBuilder::default();
    let mut ctx = BuildContext::new();
    builder.add::<User>(&mut ctx).unwrap();
    builder
        .add_enum(
            &mut ctx,
            EnumType::new("Roles")
                .with_value(EnumValue::new("USER", 0i64).with_description("A regular user"))
                .with_value(EnumValue::new("ADMIN", 1i64)),
        )
        .unwrap();
    ctx.finish().unwrap()
}

#[test]
fn test_user_schema() {
    let sdl = render(&user_graph(), &EmitOptions::default());
    insta::assert_snapshot!("user_schema", sdl);
}

#[test]
fn test_tab_indent_without_descriptions() {
    let graph = user_graph();
    let options = EmitOptions {
        indent: Indent::Tab,
        descriptions: false,
    };
    let sdl = render(&graph, &options);

    assert!(sdl.contains("type User {\n\tid: String!\n\tusername: String! @unique()\n"));
    assert!(!sdl.contains("\"The ID of the user\""));
    assert!(!sdl.contains("password"));
}
