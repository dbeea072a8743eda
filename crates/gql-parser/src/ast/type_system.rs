use super::executable::Directive;
use super::location::Location;
use super::name::Name;
use super::ty::Type;
use super::value::{StringValue, Value};

pub type Description = Option<StringValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum TypeSystemDefinitionOrExtension {
    Schema(SchemaDefinition),
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    Directive(DirectiveDefinition),
    Extension(TypeExtension),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension {
    Schema(SchemaExtension),
    Scalar(ScalarTypeExtension),
    Object(ObjectTypeExtension),
    Interface(InterfaceTypeExtension),
    Union(UnionTypeExtension),
    Enum(EnumTypeExtension),
    InputObject(InputObjectTypeExtension),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootOperationTypeDefinition {
    pub location: Option<Location>,
    pub operation: OperationKind,
    pub named_type: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub directives: Vec<Directive>,
    pub root_operation_types: Vec<RootOperationTypeDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaExtension {
    pub location: Option<Location>,
    pub directives: Vec<Directive>,
    pub root_operation_types: Vec<RootOperationTypeDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub member_types: Vec<Name>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub member_types: Vec<Name>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub value: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeExtension {
    pub location: Option<Location>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveLocation {
    // Executable locations.
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    // Type-system locations.
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub location: Option<Location>,
    pub description: Description,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}
