//! A GraphQL lexer, recursive-descent parser, AST, visitor, and canonical
//! printer.
//!
//! This crate provides the syntactic layer only: tokenizing and parsing
//! GraphQL source text (executable documents, type-system definitions, or a
//! mix of both) into an [`ast::Document`], walking that tree with a
//! [`visitor::Visitor`], and printing it back out to canonical GraphQL text.
//! Nothing here resolves type references or validates a schema — that's
//! [`gql_schema`](https://docs.rs/gql-schema), built on top of this crate's
//! AST.

pub mod ast;
mod error;
mod lexer;
mod parser;
pub mod printer;
mod source;
mod token;
pub mod visitor;

pub use error::{GraphQLErrorNote, GraphQLErrorNotes, SyntaxError};
pub use lexer::{block_string_value, Lexer};
pub use parser::{parse, parse_type, parse_value, Instrumentation, IntoSource, ParserOptions};
pub use printer::print;
pub use source::Source;
pub use token::{Token, TokenArena, TokenId, TokenKind};
pub use visitor::{visit, KeyMap, ParallelVisitor, PathKey, VisitAction, Visitor};
