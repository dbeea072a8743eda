use super::executable::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, NamedTypeCondition, OperationDefinition, Selection, SelectionSet,
    VariableDefinition,
};
use super::name::Name;
use super::ty::{ListType, NamedType, NonNullType, Type};
use super::type_system::TypeSystemDefinitionOrExtension;
use super::value::{ListValue, ObjectField, ObjectValue, Value};

/// The closed sum over every AST production.
///
/// This is the "Kind" spec.md asks every node to carry, reified as a Rust
/// enum rather than a tag field: the discriminant a `match` dispatches on
/// *is* the kind. [`crate::visitor`] walks `Node` generically; the printer
/// ([`crate::printer`]) and parser ([`crate::parser`]) both work with the
/// concrete per-production structs directly and only construct a `Node`
/// when one is needed (visiting, or reporting a location-bearing error).
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Document),
    Definition(Definition),
    OperationDefinition(OperationDefinition),
    VariableDefinition(VariableDefinition),
    SelectionSet(SelectionSet),
    Selection(Selection),
    Field(Field),
    Argument(Argument),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
    FragmentDefinition(FragmentDefinition),
    NamedTypeCondition(NamedTypeCondition),
    Directive(Directive),
    Name(Name),
    NamedType(NamedType),
    ListType(Box<ListType>),
    NonNullType(Box<NonNullType>),
    Type(Type),
    Value(Value),
    ListValue(ListValue),
    ObjectValue(ObjectValue),
    ObjectField(ObjectField),
    TypeSystem(TypeSystemDefinitionOrExtension),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Document(_) => "Document",
            Node::Definition(_) => "Definition",
            Node::OperationDefinition(_) => "OperationDefinition",
            Node::VariableDefinition(_) => "VariableDefinition",
            Node::SelectionSet(_) => "SelectionSet",
            Node::Selection(_) => "Selection",
            Node::Field(_) => "Field",
            Node::Argument(_) => "Argument",
            Node::FragmentSpread(_) => "FragmentSpread",
            Node::InlineFragment(_) => "InlineFragment",
            Node::FragmentDefinition(_) => "FragmentDefinition",
            Node::NamedTypeCondition(_) => "NamedTypeCondition",
            Node::Directive(_) => "Directive",
            Node::Name(_) => "Name",
            Node::NamedType(_) => "NamedType",
            Node::ListType(_) => "ListType",
            Node::NonNullType(_) => "NonNullType",
            Node::Type(_) => "Type",
            Node::Value(_) => "Value",
            Node::ListValue(_) => "ListValue",
            Node::ObjectValue(_) => "ObjectValue",
            Node::ObjectField(_) => "ObjectField",
            Node::TypeSystem(_) => "TypeSystemDefinitionOrExtension",
        }
    }
}
