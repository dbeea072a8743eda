//! A GraphQL language and type-system library: lexer, recursive-descent
//! parser, AST, visitor, canonical printer, and an in-memory schema with
//! reference resolution and structural validation.
//!
//! This crate is a thin facade over [`gql_parser`] and [`gql_schema`] — it
//! re-exports their public surfaces under one name and adds the two
//! operations that only make sense once both halves are in scope:
//! [`print_schema`] and [`print_introspection_schema`], which walk a
//! [`gql_schema::Schema`] back out through [`gql_parser`]'s printer.

mod introspection;
mod print_schema;

pub use gql_parser::ast;
pub use gql_parser::{
    block_string_value, parse, parse_type, parse_value, visit, GraphQLErrorNote, GraphQLErrorNotes,
    Instrumentation, IntoSource, KeyMap, Lexer, ParallelVisitor, ParserOptions, PathKey, Source,
    SyntaxError, Token, TokenArena, TokenId, TokenKind, VisitAction, Visitor,
};
pub use gql_parser::print as print_document;

pub use gql_schema::{
    build_schema, resolve_references, validate_schema, CoercedValue, CoercionError, DirectiveType,
    EnumType, EnumValueDefinition, FieldDefinition, InputObjectType, InputValueDefinition,
    InterfaceType, NamedType, ObjectType, ScalarCoercion, ScalarType, Schema,
    SchemaConstructionError, Type, TypeRef, UnionType, ValidationError,
};

pub use print_schema::{print_introspection_schema, print_schema};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_round_trips_a_document_through_parse_and_print() {
        let document = parse("{ hero { name } }", ParserOptions::default()).unwrap();
        assert_eq!(print_document(&document), "{\n  hero {\n    name\n  }\n}");
    }

    #[test]
    fn facade_builds_and_validates_a_schema() {
        let schema = build_schema("type Query {\n  hello: String!\n}\n").unwrap();
        assert!(schema.validate().is_empty());
        assert_eq!(schema.query_type().unwrap().name(), "Query");
    }
}
