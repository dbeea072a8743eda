//! The two non-overlapping error families raised above the parser's
//! [`gql_parser::SyntaxError`]: construction errors are fatal and abort
//! `Schema` assembly, validation errors accumulate and never abort anything.

use std::sync::Arc;

use gql_parser::ast::Location;

/// Raised by [`crate::build_schema`]/[`crate::Schema::new`]. Fatal: schema
/// assembly stops at the first one.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SchemaConstructionError {
    #[error("Type {name:?} not found in schema.")]
    UnresolvedTypeReference { name: String },

    #[error("Schema must contain uniquely named types but contains multiple types named {name:?}.")]
    DuplicateTypeName { name: String },

    #[error("A non-null type may not wrap another non-null type (while building {type_name:?}).")]
    NonNullOverNonNull { type_name: String },

    #[error("Query root type must be provided.")]
    MissingQueryRootType,

    #[error("{name:?} was defined more than once.")]
    DuplicateDefinition { name: String },

    #[error("Syntax error while parsing schema: {0}")]
    Syntax(#[from] gql_parser::SyntaxError),

    #[error("{message}")]
    Invalid { message: String },
}

/// A single failed scalar coercion (`serialize`/`parse_value`/
/// `parse_literal`). Not fatal to the schema — callers decide what to do
/// with a coercion failure at the point they attempt it.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CoercionError {
    pub message: String,
}

impl CoercionError {
    pub fn new(message: impl Into<String>) -> Self {
        CoercionError { message: message.into() }
    }
}

/// One structural problem found by [`crate::validate_schema`]. Never thrown;
/// always accumulated into a `Vec`.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub locations: Vec<Arc<Location>>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, locations: Vec<Arc<Location>>) -> Self {
        ValidationError { message: message.into(), locations }
    }
}
