//! In-memory GraphQL type system: named types, wrapper types, and the
//! pre-resolution [`TypeRef`] placeholder.
//!
//! Grounded on the teacher's `NamedRef<TSource, TRefLocation, TResource>` /
//! `DerefByName` pair (`named_ref.rs`): rather than mutating a field's type
//! in place once its reference resolves, a [`TypeRef`] stays a name for its
//! whole life and is dereferenced against a [`crate::Schema`] on demand.
//! That sidesteps the need for interior mutability (or `unsafe`
//! self-referential structures) when two object types refer to each other,
//! while still letting [`crate::resolve_references`] guarantee every name
//! *does* resolve before a `Schema` is ever handed back to a caller.

use std::sync::Arc;

use indexmap::IndexMap;

use gql_parser::ast;

use crate::error::CoercionError;
use crate::Schema;

/// A named type: one of the six kinds the GraphQL type system defines.
#[derive(Clone, Debug, PartialEq)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Scalar(t) => &t.name,
            NamedType::Object(t) => &t.name,
            NamedType::Interface(t) => &t.name,
            NamedType::Union(t) => &t.name,
            NamedType::Enum(t) => &t.name,
            NamedType::InputObject(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            NamedType::Scalar(t) => t.description.as_deref(),
            NamedType::Object(t) => t.description.as_deref(),
            NamedType::Interface(t) => t.description.as_deref(),
            NamedType::Union(t) => t.description.as_deref(),
            NamedType::Enum(t) => t.description.as_deref(),
            NamedType::InputObject(t) => t.description.as_deref(),
        }
    }

    /// Every reserved introspection type name begins with `__`.
    pub fn is_introspection_type(&self) -> bool {
        self.name().starts_with("__")
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            NamedType::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            NamedType::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, NamedType::Scalar(_) | NamedType::Enum(_) | NamedType::InputObject(_))
    }

    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            NamedType::Scalar(_)
                | NamedType::Object(_)
                | NamedType::Interface(_)
                | NamedType::Union(_)
                | NamedType::Enum(_)
        )
    }
}

/// `Type = NamedType | List(Type) | NonNull(Type)`, mirroring
/// [`gql_parser::ast::Type`] but resolved against a [`Schema`] instead of
/// carrying raw AST names.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Named(TypeRef),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// The innermost named type this type expression refers to.
    pub fn inner_ref(&self) -> &TypeRef {
        match self {
            Type::Named(r) => r,
            Type::List(t) | Type::NonNull(t) => t.inner_ref(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, Type::NonNull(_))
    }

    /// Builds a [`Type`] tree from a parsed [`ast::Type`], substituting a
    /// [`TypeRef`] for every named-type leaf. Fails only if the AST somehow
    /// encodes `NonNull(NonNull(_))` (the parser never constructs one).
    pub fn from_ast(ty: &ast::Type) -> Result<Type, crate::SchemaConstructionError> {
        Ok(match ty {
            ast::Type::Named(n) => Type::Named(TypeRef::new(n.name.value.clone())),
            ast::Type::List(l) => Type::List(Box::new(Type::from_ast(&l.inner)?)),
            ast::Type::NonNull(n) => {
                let inner = match &n.inner {
                    ast::NullableType::Named(named) => Type::Named(TypeRef::new(named.name.value.clone())),
                    ast::NullableType::List(l) => Type::List(Box::new(Type::from_ast(&l.inner)?)),
                };
                Type::NonNull(Box::new(inner))
            }
        })
    }
}

/// A not-yet-dereferenced (but, once [`crate::resolve_references`] has run,
/// always dereferenceable) pointer to a [`NamedType`] by name.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Looks the referenced type up in `schema`. Panics if `schema` was not
    /// the schema this reference was resolved against — by the time any
    /// `Schema` exists outside `gql-schema`, [`crate::resolve_references`]
    /// has already confirmed every reference it contains resolves.
    pub fn resolve<'a>(&self, schema: &'a Schema) -> &'a NamedType {
        schema
            .get_type(&self.0)
            .unwrap_or_else(|| panic!("TypeRef({:?}) escaped schema construction unresolved", self.0))
    }
}

/// A GraphQL runtime value as produced by scalar/enum coercion. Distinct
/// from [`ast::Value`], which is a syntax node — this is the coerced,
/// language-native result of `serialize`/`parse_value`/`parse_literal`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CoercedValue {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

/// Which built-in coercion rules a scalar uses. Custom scalars declared in
/// SDL have no coercion logic of their own (spec out of scope per
/// non-goals); they round-trip values unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarCoercion {
    Int,
    Float,
    String,
    Boolean,
    Id,
    Custom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by_url: Option<String>,
    pub coercion: ScalarCoercion,
    pub ast_node: Option<Arc<ast::ScalarTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::ScalarTypeExtension>>,
}

impl ScalarType {
    pub fn builtin(name: &str, description: &str, coercion: ScalarCoercion) -> Self {
        ScalarType {
            name: name.to_string(),
            description: Some(description.to_string()),
            specified_by_url: None,
            coercion,
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }
    }

    pub fn int() -> Self {
        Self::builtin("Int", "The `Int` scalar type represents non-fractional signed whole numeric values.", ScalarCoercion::Int)
    }

    pub fn float() -> Self {
        Self::builtin("Float", "The `Float` scalar type represents signed double-precision fractional values.", ScalarCoercion::Float)
    }

    pub fn string() -> Self {
        Self::builtin("String", "The `String` scalar type represents textual data, represented as UTF-8 character sequences.", ScalarCoercion::String)
    }

    pub fn boolean() -> Self {
        Self::builtin("Boolean", "The `Boolean` scalar type represents `true` or `false`.", ScalarCoercion::Boolean)
    }

    pub fn id() -> Self {
        Self::builtin("ID", "The `ID` scalar type represents a unique identifier, often used to refetch an object or as the key for a cache.", ScalarCoercion::Id)
    }

    pub fn serialize(&self, value: &CoercedValue) -> Result<CoercedValue, CoercionError> {
        coerce(self.coercion, value, "serialize")
    }

    pub fn parse_value(&self, value: &CoercedValue) -> Result<CoercedValue, CoercionError> {
        coerce(self.coercion, value, "parse")
    }

    pub fn parse_literal(&self, value: &ast::Value) -> Result<CoercedValue, CoercionError> {
        let coerced = match value {
            ast::Value::Int(v) => CoercedValue::Int(v.value),
            ast::Value::Float(v) => CoercedValue::Float(v.value),
            ast::Value::String(v) => CoercedValue::String(v.value.clone()),
            ast::Value::Boolean(v) => CoercedValue::Boolean(v.value),
            ast::Value::Null(_) => CoercedValue::Null,
            other => {
                return Err(CoercionError::new(format!(
                    "{} cannot represent a non-scalar literal ({other:?}).",
                    self.name
                )))
            }
        };
        self.parse_value(&coerced)
    }
}

fn coerce(coercion: ScalarCoercion, value: &CoercedValue, verb: &str) -> Result<CoercedValue, CoercionError> {
    use CoercedValue::*;
    match (coercion, value) {
        (_, Null) => Ok(Null),
        (ScalarCoercion::Int, Int(_)) => Ok(value.clone()),
        (ScalarCoercion::Int, Float(f)) if f.fract() == 0.0 => Ok(Int(*f as i64)),
        (ScalarCoercion::Float, Int(i)) => Ok(Float(*i as f64)),
        (ScalarCoercion::Float, Float(_)) => Ok(value.clone()),
        (ScalarCoercion::String, String(_)) => Ok(value.clone()),
        (ScalarCoercion::Id, String(_) | Int(_)) => Ok(value.clone()),
        (ScalarCoercion::Boolean, Boolean(_)) => Ok(value.clone()),
        (ScalarCoercion::Custom, _) => Ok(value.clone()),
        (kind, other) => Err(CoercionError::new(format!(
            "cannot {verb} {other:?} as {kind:?}."
        ))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: Type,
    pub default_value: Option<ast::Value>,
    pub deprecation_reason: Option<String>,
    pub ast_node: Option<Arc<ast::InputValueDefinition>>,
}

impl InputValueDefinition {
    /// A non-null argument/field with no default value must be supplied by
    /// every caller — the spec's definition of "required".
    pub fn is_required(&self) -> bool {
        matches!(self.ty, Type::NonNull(_)) && self.default_value.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub ty: Type,
    pub deprecation_reason: Option<String>,
    pub ast_node: Option<Arc<ast::FieldDefinition>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldDefinition>,
    pub interfaces: Vec<TypeRef>,
    pub ast_node: Option<Arc<ast::ObjectTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::ObjectTypeExtension>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldDefinition>,
    pub interfaces: Vec<TypeRef>,
    pub ast_node: Option<Arc<ast::InterfaceTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::InterfaceTypeExtension>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<TypeRef>,
    pub ast_node: Option<Arc<ast::UnionTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::UnionTypeExtension>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub value: CoercedValue,
    pub deprecation_reason: Option<String>,
    pub ast_node: Option<Arc<ast::EnumValueDefinition>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValueDefinition>,
    /// `value -> definition`, keyed by the coerced value's `Debug` rendering
    /// (SDL-defined enums give every value a `CoercedValue::String(name)`,
    /// so this coincides with `name_lookup` unless a programmatic caller
    /// assigned distinct internal values).
    pub value_lookup: IndexMap<String, EnumValueDefinition>,
    pub ast_node: Option<Arc<ast::EnumTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::EnumTypeExtension>>,
}

impl EnumType {
    pub fn new(
        name: String,
        description: Option<String>,
        values: IndexMap<String, EnumValueDefinition>,
        ast_node: Option<Arc<ast::EnumTypeDefinition>>,
    ) -> Self {
        let value_lookup = values
            .values()
            .map(|v| (format!("{:?}", v.value), v.clone()))
            .collect();
        EnumType {
            name,
            description,
            values,
            value_lookup,
            ast_node,
            extension_ast_nodes: Vec::new(),
        }
    }

    pub fn name_lookup(&self, name: &str) -> Option<&EnumValueDefinition> {
        self.values.get(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputValueDefinition>,
    pub is_one_of: bool,
    pub ast_node: Option<Arc<ast::InputObjectTypeDefinition>>,
    pub extension_ast_nodes: Vec<Arc<ast::InputObjectTypeExtension>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveType {
    pub name: String,
    pub description: Option<String>,
    pub arguments: IndexMap<String, InputValueDefinition>,
    pub locations: Vec<ast::DirectiveLocation>,
    pub is_repeatable: bool,
    pub ast_node: Option<Arc<ast::DirectiveDefinition>>,
}
