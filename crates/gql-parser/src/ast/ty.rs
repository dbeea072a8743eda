use super::location::Location;
use super::name::Name;

/// `Type = NamedType | ListType | NonNullType`.
///
/// The non-null variant wraps a [`NullableType`], which is only ever
/// `Named` or `List` — never `NonNull` again. That's the syntactic
/// invariant spec'd for the type grammar ("non-null may wrap only named or
/// list"), and it's enforced structurally here rather than by a runtime
/// check: there is no `Type` constructor that can produce
/// `NonNull(NonNull(_))`.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Named(NamedType),
    List(Box<ListType>),
    NonNull(Box<NonNullType>),
}

impl Type {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Type::Named(t) => t.location.as_ref(),
            Type::List(t) => t.location.as_ref(),
            Type::NonNull(t) => t.location.as_ref(),
        }
    }

    /// The innermost named type this type expression refers to, unwrapping
    /// any `List`/`NonNull` wrappers.
    pub fn inner_name(&self) -> &Name {
        match self {
            Type::Named(t) => &t.name,
            Type::List(t) => t.inner.inner_name(),
            Type::NonNull(t) => t.inner.inner_name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub location: Option<Location>,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListType {
    pub location: Option<Location>,
    pub inner: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NonNullType {
    pub location: Option<Location>,
    pub inner: NullableType,
}

/// The only two productions a `NonNullType` may wrap.
#[derive(Clone, Debug, PartialEq)]
pub enum NullableType {
    Named(NamedType),
    List(Box<ListType>),
}

impl NullableType {
    fn inner_name(&self) -> &Name {
        match self {
            NullableType::Named(t) => &t.name,
            NullableType::List(t) => t.inner.inner_name(),
        }
    }

    pub fn into_type(self) -> Type {
        match self {
            NullableType::Named(t) => Type::Named(t),
            NullableType::List(t) => Type::List(t),
        }
    }
}
