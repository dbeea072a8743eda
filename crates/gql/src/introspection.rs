//! The fixed introspection meta-schema: `__Schema`, `__Type`, and friends,
//! plus the three default directives every schema carries.
//!
//! Per REDESIGN FLAGS, these are built once per process behind a
//! [`std::sync::OnceLock`] rather than as process-wide *mutable* singletons
//! — distinct [`gql_schema::Schema`] values never share anything through
//! this module, they only ever read the same frozen `Vec`.

use std::sync::OnceLock;

use indexmap::IndexMap;

use gql_parser::ast;
use gql_schema::{
    DirectiveType, EnumType, EnumValueDefinition, FieldDefinition, InputValueDefinition, NamedType,
    ObjectType, Type, TypeRef,
};

pub fn types() -> &'static [NamedType] {
    static TYPES: OnceLock<Vec<NamedType>> = OnceLock::new();
    TYPES.get_or_init(build_types)
}

pub fn default_directives() -> Vec<DirectiveType> {
    let if_arg = InputValueDefinition {
        name: "if".to_string(),
        description: None,
        ty: non_null(named("Boolean")),
        default_value: None,
        deprecation_reason: None,
        ast_node: None,
    };
    vec![
        DirectiveType {
            name: "skip".to_string(),
            description: Some("Directs the executor to skip this field or fragment when the `if` argument is true.".to_string()),
            arguments: args(vec![if_arg.clone()]),
            locations: vec![ast::DirectiveLocation::Field, ast::DirectiveLocation::FragmentSpread, ast::DirectiveLocation::InlineFragment],
            is_repeatable: false,
            ast_node: None,
        },
        DirectiveType {
            name: "include".to_string(),
            description: Some("Directs the executor to include this field or fragment only when the `if` argument is true.".to_string()),
            arguments: args(vec![if_arg]),
            locations: vec![ast::DirectiveLocation::Field, ast::DirectiveLocation::FragmentSpread, ast::DirectiveLocation::InlineFragment],
            is_repeatable: false,
            ast_node: None,
        },
        DirectiveType {
            name: "deprecated".to_string(),
            description: Some("Marks an element of a GraphQL schema as no longer supported.".to_string()),
            arguments: args(vec![InputValueDefinition {
                name: "reason".to_string(),
                description: Some("Explains why this element was deprecated.".to_string()),
                ty: named("String"),
                default_value: Some(ast::Value::String(ast::StringValue {
                    location: None,
                    value: "No longer supported.".to_string(),
                    block: false,
                })),
                deprecation_reason: None,
                ast_node: None,
            }]),
            locations: vec![
                ast::DirectiveLocation::FieldDefinition,
                ast::DirectiveLocation::ArgumentDefinition,
                ast::DirectiveLocation::InputFieldDefinition,
                ast::DirectiveLocation::Enum,
                ast::DirectiveLocation::EnumValue,
            ],
            is_repeatable: false,
            ast_node: None,
        },
    ]
}

fn named(name: &str) -> Type {
    Type::Named(TypeRef::new(name))
}

fn non_null(ty: Type) -> Type {
    Type::NonNull(Box::new(ty))
}

fn list(ty: Type) -> Type {
    Type::List(Box::new(ty))
}

fn args(values: Vec<InputValueDefinition>) -> IndexMap<String, InputValueDefinition> {
    values.into_iter().map(|v| (v.name.clone(), v)).collect()
}

fn field(name: &str, ty: Type, arguments: Vec<InputValueDefinition>) -> FieldDefinition {
    FieldDefinition { name: name.to_string(), description: None, arguments: args(arguments), ty, deprecation_reason: None, ast_node: None }
}

fn include_deprecated_arg() -> InputValueDefinition {
    InputValueDefinition {
        name: "includeDeprecated".to_string(),
        description: None,
        ty: named("Boolean"),
        default_value: Some(ast::Value::Boolean(ast::BooleanValue { location: None, value: false })),
        deprecation_reason: None,
        ast_node: None,
    }
}

fn object(name: &str, fields: Vec<FieldDefinition>) -> NamedType {
    let mut map = IndexMap::new();
    for f in fields {
        map.insert(f.name.clone(), f);
    }
    NamedType::Object(ObjectType { name: name.to_string(), description: None, fields: map, interfaces: Vec::new(), ast_node: None, extension_ast_nodes: Vec::new() })
}

fn enum_type(name: &str, values: &[&str]) -> NamedType {
    let mut map = IndexMap::new();
    for v in values {
        map.insert(
            v.to_string(),
            EnumValueDefinition {
                name: v.to_string(),
                description: None,
                value: gql_schema::CoercedValue::String(v.to_string()),
                deprecation_reason: None,
                ast_node: None,
            },
        );
    }
    NamedType::Enum(EnumType::new(name.to_string(), None, map, None))
}

fn build_types() -> Vec<NamedType> {
    vec![
        object(
            "__Schema",
            vec![
                field("description", named("String"), vec![]),
                field("types", non_null(list(non_null(named("__Type")))), vec![]),
                field("queryType", non_null(named("__Type")), vec![]),
                field("mutationType", named("__Type"), vec![]),
                field("subscriptionType", named("__Type"), vec![]),
                field("directives", non_null(list(non_null(named("__Directive")))), vec![]),
            ],
        ),
        object(
            "__Type",
            vec![
                field("kind", non_null(named("__TypeKind")), vec![]),
                field("name", named("String"), vec![]),
                field("description", named("String"), vec![]),
                field("specifiedByURL", named("String"), vec![]),
                field("fields", list(non_null(named("__Field"))), vec![include_deprecated_arg()]),
                field("interfaces", list(non_null(named("__Type"))), vec![]),
                field("possibleTypes", list(non_null(named("__Type"))), vec![]),
                field("enumValues", list(non_null(named("__EnumValue"))), vec![include_deprecated_arg()]),
                field("inputFields", list(non_null(named("__InputValue"))), vec![include_deprecated_arg()]),
                field("ofType", named("__Type"), vec![]),
            ],
        ),
        object(
            "__Field",
            vec![
                field("name", non_null(named("String")), vec![]),
                field("description", named("String"), vec![]),
                field("args", non_null(list(non_null(named("__InputValue")))), vec![include_deprecated_arg()]),
                field("type", non_null(named("__Type")), vec![]),
                field("isDeprecated", non_null(named("Boolean")), vec![]),
                field("deprecationReason", named("String"), vec![]),
            ],
        ),
        object(
            "__InputValue",
            vec![
                field("name", non_null(named("String")), vec![]),
                field("description", named("String"), vec![]),
                field("type", non_null(named("__Type")), vec![]),
                field("defaultValue", named("String"), vec![]),
                field("isDeprecated", non_null(named("Boolean")), vec![]),
                field("deprecationReason", named("String"), vec![]),
            ],
        ),
        object(
            "__EnumValue",
            vec![
                field("name", non_null(named("String")), vec![]),
                field("description", named("String"), vec![]),
                field("isDeprecated", non_null(named("Boolean")), vec![]),
                field("deprecationReason", named("String"), vec![]),
            ],
        ),
        object(
            "__Directive",
            vec![
                field("name", non_null(named("String")), vec![]),
                field("description", named("String"), vec![]),
                field("locations", non_null(list(non_null(named("__DirectiveLocation")))), vec![]),
                field("args", non_null(list(non_null(named("__InputValue")))), vec![include_deprecated_arg()]),
                field("isRepeatable", non_null(named("Boolean")), vec![]),
            ],
        ),
        enum_type("__TypeKind", &["SCALAR", "OBJECT", "INTERFACE", "UNION", "ENUM", "INPUT_OBJECT", "LIST", "NON_NULL"]),
        enum_type(
            "__DirectiveLocation",
            &[
                "QUERY",
                "MUTATION",
                "SUBSCRIPTION",
                "FIELD",
                "FRAGMENT_DEFINITION",
                "FRAGMENT_SPREAD",
                "INLINE_FRAGMENT",
                "VARIABLE_DEFINITION",
                "SCHEMA",
                "SCALAR",
                "OBJECT",
                "FIELD_DEFINITION",
                "ARGUMENT_DEFINITION",
                "INTERFACE",
                "UNION",
                "ENUM",
                "ENUM_VALUE",
                "INPUT_OBJECT",
                "INPUT_FIELD_DEFINITION",
            ],
        ),
    ]
}
