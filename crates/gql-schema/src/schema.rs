//! [`Schema`]: the assembled, reference-resolved, immutable type map.
//!
//! Grounded on the teacher's `schema.rs`/`Schema` struct (a named-type map
//! plus root-operation slots) and on spec section 4.8's "the schema
//! memoizes the [validation] result" — we use [`std::sync::OnceLock`]
//! rather than a `Cell`/`RefCell` for that memo specifically so the memo
//! itself never requires `&mut Schema` to populate, matching spec section
//! 5's "concurrent readers are safe" even though, in practice, the AST
//! [`gql_parser::ast::Location`]s reachable from a `Schema`'s `ast_node`s
//! carry an `Rc<Source>` and are therefore not actually `Send`/`Sync` — see
//! DESIGN.md.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::error::{SchemaConstructionError, ValidationError};
use crate::types::{DirectiveType, NamedType, ScalarType};
use crate::validate::validate_schema;

/// An assembled GraphQL type system: every named type reachable from the
/// root operation types, plus the directive definitions in scope.
///
/// Construction always runs [`crate::resolve_references`] before returning
/// `Ok`, so by the time a `Schema` value exists, every [`crate::TypeRef`] it
/// contains is guaranteed to resolve (spec section 8's "type-reference
/// closure" property).
#[derive(Debug)]
pub struct Schema {
    pub(crate) types: IndexMap<String, Arc<NamedType>>,
    pub(crate) directives: IndexMap<String, Arc<DirectiveType>>,
    pub(crate) query_type: Option<Arc<NamedType>>,
    pub(crate) mutation_type: Option<Arc<NamedType>>,
    pub(crate) subscription_type: Option<Arc<NamedType>>,
    validation_cache: OnceLock<Vec<ValidationError>>,
}

impl Schema {
    /// Low-level, fully-materialized constructor — the Rust shape of the
    /// spec's `GraphQLSchema(query, mutation?, subscription?, types?,
    /// directives?)`. `query` is mandatory here because the constructor
    /// signature itself is the enforcement mechanism for "every
    /// programmatically built schema has a query root"; SDL documents
    /// without a `schema { query: ... }` block and without a conventional
    /// `Query` type go through [`crate::build_schema`] instead, which
    /// tolerates a missing query root and lets [`crate::validate_schema`]
    /// report it.
    pub fn new(
        query: Arc<NamedType>,
        mutation: Option<Arc<NamedType>>,
        subscription: Option<Arc<NamedType>>,
        types: impl IntoIterator<Item = Arc<NamedType>>,
        directives: impl IntoIterator<Item = Arc<DirectiveType>>,
    ) -> Result<Schema, SchemaConstructionError> {
        let mut type_map = IndexMap::new();
        type_map.insert(query.name().to_string(), query.clone());
        if let Some(m) = &mutation {
            type_map.insert(m.name().to_string(), m.clone());
        }
        if let Some(s) = &subscription {
            type_map.insert(s.name().to_string(), s.clone());
        }
        for ty in types {
            insert_unique(&mut type_map, ty)?;
        }

        let mut directive_map = IndexMap::new();
        for d in directives {
            if directive_map.insert(d.name.clone(), d).is_some() {
                return Err(SchemaConstructionError::DuplicateDefinition {
                    name: "directive".to_string(),
                });
            }
        }

        Self::assemble(type_map, directive_map, Some(query), mutation, subscription)
    }

    pub(crate) fn assemble(
        mut types: IndexMap<String, Arc<NamedType>>,
        directives: IndexMap<String, Arc<DirectiveType>>,
        query_type: Option<Arc<NamedType>>,
        mutation_type: Option<Arc<NamedType>>,
        subscription_type: Option<Arc<NamedType>>,
    ) -> Result<Schema, SchemaConstructionError> {
        for builtin in [
            NamedType::Scalar(ScalarType::int()),
            NamedType::Scalar(ScalarType::float()),
            NamedType::Scalar(ScalarType::string()),
            NamedType::Scalar(ScalarType::boolean()),
            NamedType::Scalar(ScalarType::id()),
        ] {
            types.entry(builtin.name().to_string()).or_insert_with(|| Arc::new(builtin));
        }

        let schema = Schema {
            types,
            directives,
            query_type,
            mutation_type,
            subscription_type,
            validation_cache: OnceLock::new(),
        };
        crate::resolve::resolve_references(&schema)?;
        Ok(schema)
    }

    pub fn get_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name).map(Arc::as_ref)
    }

    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values().map(Arc::as_ref)
    }

    pub fn get_directive(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name).map(Arc::as_ref)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveType> {
        self.directives.values().map(Arc::as_ref)
    }

    pub fn query_type(&self) -> Option<&NamedType> {
        self.query_type.as_deref()
    }

    pub fn mutation_type(&self) -> Option<&NamedType> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type(&self) -> Option<&NamedType> {
        self.subscription_type.as_deref()
    }

    /// Every object type that is either `ty` itself, or declares (directly
    /// or transitively, through an interface chain) that it implements
    /// `ty`, or — if `ty` is a union — is one of its members.
    pub fn possible_types(&self, ty: &NamedType) -> Vec<&NamedType> {
        match ty {
            NamedType::Object(_) => vec![ty],
            NamedType::Union(u) => u.types.iter().map(|r| r.resolve(self)).collect(),
            NamedType::Interface(iface) => self
                .types()
                .filter(|candidate| match candidate {
                    NamedType::Object(obj) => {
                        implements_transitively(self, &obj.interfaces, &iface.name)
                    }
                    NamedType::Interface(other) if other.name != iface.name => {
                        implements_transitively(self, &other.interfaces, &iface.name)
                    }
                    _ => false,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Runs [`crate::validate_schema`] once and memoizes the result; later
    /// calls return the cached `Vec` without re-validating.
    pub fn validate(&self) -> &[ValidationError] {
        self.validation_cache.get_or_init(|| validate_schema(self))
    }
}

fn implements_transitively(
    schema: &Schema,
    interfaces: &[crate::types::TypeRef],
    target: &str,
) -> bool {
    interfaces.iter().any(|i| {
        if i.name() == target {
            return true;
        }
        match i.resolve(schema) {
            NamedType::Interface(parent) => implements_transitively(schema, &parent.interfaces, target),
            _ => false,
        }
    })
}

fn insert_unique(
    map: &mut IndexMap<String, Arc<NamedType>>,
    ty: Arc<NamedType>,
) -> Result<(), SchemaConstructionError> {
    let name = ty.name().to_string();
    if map.insert(name.clone(), ty).is_some() {
        return Err(SchemaConstructionError::DuplicateTypeName { name });
    }
    Ok(())
}
