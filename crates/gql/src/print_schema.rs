//! `print_schema`/`print_introspection_schema`: rendering an assembled
//! [`gql_schema::Schema`] back to SDL.
//!
//! Grounded on the observation that every [`gql_schema::types::Type`] et al.
//! already borrows most of its shape straight from `gql_parser::ast` (type
//! expressions, default values, directive locations) — so printing a schema
//! is mostly a matter of synthesizing the handful of AST nodes `gql-schema`
//! *doesn't* keep verbatim (names, descriptions, directive argument lists)
//! and handing the result to [`gql_parser::print`], the same canonical
//! printer the executable/SDL side uses. One formatter, not two.

use gql_parser::ast::{self, Definition, Document, Name, TypeSystemDefinitionOrExtension as TSD};
use gql_schema::{NamedType, Schema, Type};

/// Renders every user-defined type and directive in `schema` as SDL, in the
/// canonical printer's format. Built-in scalars, the three default
/// directives (`@skip`/`@include`/`@deprecated`), and introspection types
/// are omitted, matching graphql-js's `printSchema`.
pub fn print_schema(schema: &Schema) -> String {
    let mut definitions = Vec::new();
    if needs_schema_definition(schema) {
        definitions.push(Definition::TypeSystem(TSD::Schema(schema_definition_ast(schema))));
    }
    for directive in schema.directives() {
        if is_default_directive(&directive.name) {
            continue;
        }
        definitions.push(Definition::TypeSystem(TSD::Directive(directive_to_ast(directive))));
    }
    for ty in schema.types() {
        if ty.is_introspection_type() || is_builtin_scalar(ty) {
            continue;
        }
        definitions.push(Definition::TypeSystem(named_type_to_definition(ty)));
    }
    gql_parser::print(&Document { location: None, definitions })
}

/// Renders the fixed introspection meta-schema (`__Schema`, `__Type`, ...
/// and the three default directives) that every GraphQL service exposes
/// regardless of its own types. Unlike [`print_schema`], the output does
/// not depend on `schema`'s user-defined types.
pub fn print_introspection_schema(_schema: &Schema) -> String {
    let mut definitions = Vec::new();
    for directive in crate::introspection::default_directives() {
        definitions.push(Definition::TypeSystem(TSD::Directive(directive_to_ast(&directive))));
    }
    for ty in crate::introspection::types() {
        definitions.push(Definition::TypeSystem(named_type_to_definition(ty)));
    }
    gql_parser::print(&Document { location: None, definitions })
}

fn is_default_directive(name: &str) -> bool {
    matches!(name, "skip" | "include" | "deprecated")
}

fn is_builtin_scalar(ty: &NamedType) -> bool {
    matches!(ty, NamedType::Scalar(_)) && matches!(ty.name(), "Int" | "Float" | "String" | "Boolean" | "ID")
}

fn needs_schema_definition(schema: &Schema) -> bool {
    let matches_convention = |ty: Option<&NamedType>, conventional: &str| {
        ty.map_or(true, |t| t.name() == conventional)
    };
    !(matches_convention(schema.query_type(), "Query")
        && matches_convention(schema.mutation_type(), "Mutation")
        && matches_convention(schema.subscription_type(), "Subscription"))
}

fn schema_definition_ast(schema: &Schema) -> ast::SchemaDefinition {
    use ast::OperationKind;
    let mut root_operation_types = Vec::new();
    if let Some(t) = schema.query_type() {
        root_operation_types.push(root_operation_type(OperationKind::Query, t.name()));
    }
    if let Some(t) = schema.mutation_type() {
        root_operation_types.push(root_operation_type(OperationKind::Mutation, t.name()));
    }
    if let Some(t) = schema.subscription_type() {
        root_operation_types.push(root_operation_type(OperationKind::Subscription, t.name()));
    }
    ast::SchemaDefinition { location: None, description: None, directives: Vec::new(), root_operation_types }
}

fn root_operation_type(operation: ast::OperationKind, name: &str) -> ast::RootOperationTypeDefinition {
    ast::RootOperationTypeDefinition { location: None, operation, named_type: Name::new(name) }
}

fn description_to_ast(description: Option<&str>) -> ast::Description {
    description.map(|value| ast::StringValue { location: None, value: value.to_string(), block: false })
}

fn ty_to_ast(ty: &Type) -> ast::Type {
    match ty {
        Type::Named(r) => ast::Type::Named(ast::NamedType { location: None, name: Name::new(r.name()) }),
        Type::List(inner) => ast::Type::List(Box::new(ast::ListType { location: None, inner: ty_to_ast(inner) })),
        Type::NonNull(inner) => {
            ast::Type::NonNull(Box::new(ast::NonNullType { location: None, inner: nullable_ty_to_ast(inner) }))
        }
    }
}

fn nullable_ty_to_ast(ty: &Type) -> ast::NullableType {
    match ty {
        Type::Named(r) => ast::NullableType::Named(ast::NamedType { location: None, name: Name::new(r.name()) }),
        Type::List(inner) => ast::NullableType::List(Box::new(ast::ListType { location: None, inner: ty_to_ast(inner) })),
        Type::NonNull(_) => unreachable!("a non-null type never wraps another non-null type"),
    }
}

fn deprecated_directive(reason: Option<&str>) -> Vec<ast::Directive> {
    match reason {
        None => Vec::new(),
        Some(reason) => {
            let arguments = if reason == "No longer supported." {
                Vec::new()
            } else {
                vec![ast::Argument {
                    location: None,
                    name: Name::new("reason"),
                    value: ast::Value::String(ast::StringValue { location: None, value: reason.to_string(), block: false }),
                }]
            };
            vec![ast::Directive { location: None, name: Name::new("deprecated"), arguments }]
        }
    }
}

fn specified_by_directives(url: Option<&str>) -> Vec<ast::Directive> {
    match url {
        None => Vec::new(),
        Some(url) => vec![ast::Directive {
            location: None,
            name: Name::new("specifiedBy"),
            arguments: vec![ast::Argument {
                location: None,
                name: Name::new("url"),
                value: ast::Value::String(ast::StringValue { location: None, value: url.to_string(), block: false }),
            }],
        }],
    }
}

fn input_value_to_ast(v: &gql_schema::InputValueDefinition) -> ast::InputValueDefinition {
    ast::InputValueDefinition {
        location: None,
        description: description_to_ast(v.description.as_deref()),
        name: Name::new(&v.name),
        ty: ty_to_ast(&v.ty),
        default_value: v.default_value.clone(),
        directives: deprecated_directive(v.deprecation_reason.as_deref()),
    }
}

fn field_to_ast(f: &gql_schema::FieldDefinition) -> ast::FieldDefinition {
    ast::FieldDefinition {
        location: None,
        description: description_to_ast(f.description.as_deref()),
        name: Name::new(&f.name),
        arguments: f.arguments.values().map(input_value_to_ast).collect(),
        ty: ty_to_ast(&f.ty),
        directives: deprecated_directive(f.deprecation_reason.as_deref()),
    }
}

fn enum_value_to_ast(v: &gql_schema::EnumValueDefinition) -> ast::EnumValueDefinition {
    ast::EnumValueDefinition {
        location: None,
        description: description_to_ast(v.description.as_deref()),
        value: Name::new(&v.name),
        directives: deprecated_directive(v.deprecation_reason.as_deref()),
    }
}

fn directive_to_ast(d: &gql_schema::DirectiveType) -> ast::DirectiveDefinition {
    ast::DirectiveDefinition {
        location: None,
        description: description_to_ast(d.description.as_deref()),
        name: Name::new(&d.name),
        arguments: d.arguments.values().map(input_value_to_ast).collect(),
        repeatable: d.is_repeatable,
        locations: d.locations.clone(),
    }
}

fn named_type_to_definition(named: &NamedType) -> TSD {
    match named {
        NamedType::Scalar(t) => TSD::Scalar(ast::ScalarTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            directives: specified_by_directives(t.specified_by_url.as_deref()),
        }),
        NamedType::Object(t) => TSD::Object(ast::ObjectTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            interfaces: t.interfaces.iter().map(|r| Name::new(r.name())).collect(),
            directives: Vec::new(),
            fields: t.fields.values().map(field_to_ast).collect(),
        }),
        NamedType::Interface(t) => TSD::Interface(ast::InterfaceTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            interfaces: t.interfaces.iter().map(|r| Name::new(r.name())).collect(),
            directives: Vec::new(),
            fields: t.fields.values().map(field_to_ast).collect(),
        }),
        NamedType::Union(t) => TSD::Union(ast::UnionTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            directives: Vec::new(),
            member_types: t.types.iter().map(|r| Name::new(r.name())).collect(),
        }),
        NamedType::Enum(t) => TSD::Enum(ast::EnumTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            directives: Vec::new(),
            values: t.values.values().map(enum_value_to_ast).collect(),
        }),
        NamedType::InputObject(t) => TSD::InputObject(ast::InputObjectTypeDefinition {
            location: None,
            description: description_to_ast(t.description.as_deref()),
            name: Name::new(&t.name),
            directives: if t.is_one_of {
                vec![ast::Directive { location: None, name: Name::new("oneOf"), arguments: Vec::new() }]
            } else {
                Vec::new()
            },
            fields: t.fields.values().map(input_value_to_ast).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_a_built_schema_back_to_sdl() {
        let schema = gql_schema::build_schema(
            "type Query {\n  greeting(name: String = \"world\"): String!\n}\n",
        )
        .unwrap();
        let printed = print_schema(&schema);
        assert!(printed.contains("type Query {"));
        assert!(printed.contains("greeting(name: String = \"world\"): String!"));
        assert!(!printed.contains("scalar String"));
    }

    #[test]
    fn omits_default_directives_and_builtin_scalars() {
        let schema = gql_schema::build_schema("type Query {\n  ok: Boolean\n}\n").unwrap();
        let printed = print_schema(&schema);
        assert!(!printed.contains("directive @skip"));
        assert!(!printed.contains("scalar Boolean"));
    }

    #[test]
    fn non_conventional_root_names_emit_a_schema_block() {
        let schema = gql_schema::build_schema(
            "schema { query: RootQuery }\ntype RootQuery {\n  ok: Boolean\n}\n",
        )
        .unwrap();
        let printed = print_schema(&schema);
        assert!(printed.starts_with("schema {\n  query: RootQuery\n}"));
    }

    #[test]
    fn introspection_schema_defines_the_meta_types() {
        let schema = gql_schema::build_schema("type Query { ok: Boolean }").unwrap();
        let printed = print_introspection_schema(&schema);
        assert!(printed.contains("type __Schema {"));
        assert!(printed.contains("enum __TypeKind {"));
        assert!(printed.contains("directive @deprecated"));
    }
}
