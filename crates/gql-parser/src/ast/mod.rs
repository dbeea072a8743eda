//! The GraphQL abstract syntax tree.
//!
//! One file per grammar family rather than per production: `location` and
//! `name` are the two leaf types every other node embeds, `value` and `ty`
//! are the two small recursive sub-languages (`Value`, `Type`), `executable`
//! covers operations/fragments/selections, and `type_system` covers schema
//! definitions and their extensions. `node` ties all of it together into the
//! closed [`Node`] sum the visitor walks.

mod executable;
mod location;
mod name;
mod node;
mod ty;
mod type_system;
mod value;

pub use executable::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, NamedTypeCondition, OperationDefinition, OperationType, Selection,
    SelectionSet, VariableDefinition,
};
pub use location::Location;
pub use name::Name;
pub use node::Node;
pub use ty::{ListType, NamedType, NonNullType, NullableType, Type};
pub use type_system::{
    Description, DirectiveDefinition, DirectiveLocation, EnumTypeDefinition, EnumTypeExtension,
    EnumValueDefinition, FieldDefinition, InputObjectTypeDefinition, InputObjectTypeExtension,
    InputValueDefinition, InterfaceTypeDefinition, InterfaceTypeExtension, ObjectTypeDefinition,
    ObjectTypeExtension, OperationKind, RootOperationTypeDefinition, ScalarTypeDefinition,
    ScalarTypeExtension, SchemaDefinition, SchemaExtension, TypeExtension,
    TypeSystemDefinitionOrExtension, UnionTypeDefinition, UnionTypeExtension,
};
pub use value::{
    BooleanValue, EnumValue, FloatValue, IntValue, ListValue, NullValue, ObjectField, ObjectValue,
    StringValue, Value, Variable,
};
