use super::location::Location;

/// A GraphQL name. Equality is by `value` only, per spec — two `Name`s
/// parsed from different locations (or with/without a `Location` at all)
/// compare equal as long as the text matches.
#[derive(Clone, Debug)]
pub struct Name {
    pub location: Option<Location>,
    pub value: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Name {
            location: None,
            value: value.into(),
        }
    }

    pub fn with_location(value: impl Into<String>, location: Location) -> Self {
        Name {
            location: Some(location),
            value: value.into(),
        }
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl Eq for Name {}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
