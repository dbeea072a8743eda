use super::location::Location;
use super::name::Name;

/// `Value[?Const]` from the grammar. `Variable` only ever appears where the
/// non-const production is in play; `parse_value`/the `Const` productions
/// never construct it (enforced by the parser, not by this type).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(Variable),
    Int(IntValue),
    Float(FloatValue),
    String(StringValue),
    Boolean(BooleanValue),
    Null(NullValue),
    Enum(EnumValue),
    List(ListValue),
    Object(ObjectValue),
}

impl Value {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Value::Variable(v) => v.location.as_ref(),
            Value::Int(v) => v.location.as_ref(),
            Value::Float(v) => v.location.as_ref(),
            Value::String(v) => v.location.as_ref(),
            Value::Boolean(v) => v.location.as_ref(),
            Value::Null(v) => v.location.as_ref(),
            Value::Enum(v) => v.location.as_ref(),
            Value::List(v) => v.location.as_ref(),
            Value::Object(v) => v.location.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub location: Option<Location>,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntValue {
    pub location: Option<Location>,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue {
    pub location: Option<Location>,
    pub value: f64,
}

impl Eq for FloatValue {}
impl std::hash::Hash for FloatValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.to_bits().hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringValue {
    pub location: Option<Location>,
    pub value: String,
    /// Whether this was written as a block string (`"""..."""`). Affects
    /// how the printer renders it back out, not equality/semantics.
    pub block: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BooleanValue {
    pub location: Option<Location>,
    pub value: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullValue {
    pub location: Option<Location>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub location: Option<Location>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    pub location: Option<Location>,
    pub values: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub location: Option<Location>,
    pub fields: Vec<ObjectField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub location: Option<Location>,
    pub name: Name,
    pub value: Value,
}
