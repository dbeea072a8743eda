//! An in-memory GraphQL type system: the assembled [`Schema`], its
//! [`TypeRef`] reference resolver, and the structural [`validate_schema`]
//! checker.
//!
//! `gql-parser` turns source text into a syntax tree; this crate turns a
//! syntax tree (or a programmatically-built set of types) into a *type
//! system* — the thing a validator, executor, or introspection endpoint
//! actually walks. The three stages run in sequence every time a [`Schema`]
//! comes into existence: assembly ([`Schema::new`]/[`build_schema`]),
//! reference resolution ([`resolve_references`], run automatically during
//! assembly), and validation ([`Schema::validate`], run lazily and memoized).

mod builder;
mod error;
mod resolve;
mod schema;
mod types;
mod validate;

pub use builder::build_schema;
pub use error::{CoercionError, SchemaConstructionError, ValidationError};
pub use resolve::resolve_references;
pub use schema::Schema;
pub use types::{
    CoercedValue, DirectiveType, EnumType, EnumValueDefinition, FieldDefinition, InputObjectType,
    InputValueDefinition, InterfaceType, NamedType, ObjectType, ScalarCoercion, ScalarType, Type,
    TypeRef, UnionType,
};
pub use validate::validate_schema;
