use super::location::Location;
use super::name::Name;
use super::ty::Type;
use super::type_system::TypeSystemDefinitionOrExtension;
use super::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub location: Option<Location>,
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    TypeSystem(TypeSystemDefinitionOrExtension),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub location: Option<Location>,
    pub operation: OperationType,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub location: Option<Location>,
    pub variable: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub location: Option<Location>,
    pub name: Name,
    pub arguments: Vec<Argument>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub location: Option<Location>,
    pub name: Name,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub location: Option<Location>,
    pub selections: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub location: Option<Location>,
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// The name used to key this field's result: the alias if present,
    /// otherwise the field name.
    pub fn response_name(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).value.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub location: Option<Location>,
    pub fragment_name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub location: Option<Location>,
    pub type_condition: Option<NamedTypeCondition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeCondition {
    pub location: Option<Location>,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub location: Option<Location>,
    pub name: Name,
    pub type_condition: NamedTypeCondition,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}
