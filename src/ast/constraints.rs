use crate::value::Value;

/// Leaf comparison applied to the value currently in scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Loose equality (`1 == 1.0`)
    Equals(Value),
    /// Loose inequality
    NotEquals(Value),
    /// Strict identity: same type and same value
    Same(Value),
    /// Strict non-identity
    NotSame(Value),
    /// String prefix test
    StartsWith(String),
    /// String suffix test
    EndsWith(String),
    /// Substring test
    Contains(String),
    /// Regular expression test
    Matches(String),
    /// Membership in a list of values
    In(Vec<Value>),
    /// Object has the given key
    KeyExists(String),
    /// Object lacks the given key
    KeyNotExists(String),
    /// Value is null, false, zero, empty string or empty collection
    IsEmpty,
    GreaterThan(Value),
    GreaterThanEqual(Value),
    LessThan(Value),
    LessThanEqual(Value),
    /// Value has the named type (`integer`, `string`, `number`, ...)
    IsInstanceOf(String),
}

/// Fieldless mirror of [`Constraint`].
///
/// Holds the wire name table used by both codecs, so the array format and the
/// text grammar always recognize the same constraint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Equals,
    NotEquals,
    Same,
    NotSame,
    StartsWith,
    EndsWith,
    Contains,
    Matches,
    In,
    KeyExists,
    KeyNotExists,
    IsEmpty,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    IsInstanceOf,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 17] = [
        ConstraintKind::Equals,
        ConstraintKind::NotEquals,
        ConstraintKind::Same,
        ConstraintKind::NotSame,
        ConstraintKind::StartsWith,
        ConstraintKind::EndsWith,
        ConstraintKind::Contains,
        ConstraintKind::Matches,
        ConstraintKind::In,
        ConstraintKind::KeyExists,
        ConstraintKind::KeyNotExists,
        ConstraintKind::IsEmpty,
        ConstraintKind::GreaterThan,
        ConstraintKind::GreaterThanEqual,
        ConstraintKind::LessThan,
        ConstraintKind::LessThanEqual,
        ConstraintKind::IsInstanceOf,
    ];

    /// Canonical name, used in errors and as the array-format tag for all
    /// kinds but `instanceof`.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::Equals => "equals",
            ConstraintKind::NotEquals => "notEquals",
            ConstraintKind::Same => "same",
            ConstraintKind::NotSame => "notSame",
            ConstraintKind::StartsWith => "startsWith",
            ConstraintKind::EndsWith => "endsWith",
            ConstraintKind::Contains => "contains",
            ConstraintKind::Matches => "matches",
            ConstraintKind::In => "in",
            ConstraintKind::KeyExists => "keyExists",
            ConstraintKind::KeyNotExists => "keyNotExists",
            ConstraintKind::IsEmpty => "isEmpty",
            ConstraintKind::GreaterThan => "greaterThan",
            ConstraintKind::GreaterThanEqual => "greaterThanEqual",
            ConstraintKind::LessThan => "lessThan",
            ConstraintKind::LessThanEqual => "lessThanEqual",
            ConstraintKind::IsInstanceOf => "isInstanceOf",
        }
    }

    /// Function name written by the text codec.
    pub fn text_name(self) -> &'static str {
        match self {
            ConstraintKind::IsEmpty => "empty",
            ConstraintKind::IsInstanceOf => "instanceOf",
            other => other.name(),
        }
    }

    /// `constraint` tag written by the array codec.
    pub fn array_name(self) -> &'static str {
        match self {
            ConstraintKind::IsInstanceOf => "instanceof",
            other => other.name(),
        }
    }

    /// Exact-match lookup on the canonical name; no prefix guessing.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Exact-match lookup accepting the canonical, text and array spellings,
    /// so either codec reads what the other writes.
    pub fn from_any_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.text_name() == name || kind.array_name() == name)
    }

    /// Whether the constraint carries a compared value at all.
    pub fn takes_value(self) -> bool {
        !matches!(self, ConstraintKind::IsEmpty)
    }
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Equals(_) => ConstraintKind::Equals,
            Constraint::NotEquals(_) => ConstraintKind::NotEquals,
            Constraint::Same(_) => ConstraintKind::Same,
            Constraint::NotSame(_) => ConstraintKind::NotSame,
            Constraint::StartsWith(_) => ConstraintKind::StartsWith,
            Constraint::EndsWith(_) => ConstraintKind::EndsWith,
            Constraint::Contains(_) => ConstraintKind::Contains,
            Constraint::Matches(_) => ConstraintKind::Matches,
            Constraint::In(_) => ConstraintKind::In,
            Constraint::KeyExists(_) => ConstraintKind::KeyExists,
            Constraint::KeyNotExists(_) => ConstraintKind::KeyNotExists,
            Constraint::IsEmpty => ConstraintKind::IsEmpty,
            Constraint::GreaterThan(_) => ConstraintKind::GreaterThan,
            Constraint::GreaterThanEqual(_) => ConstraintKind::GreaterThanEqual,
            Constraint::LessThan(_) => ConstraintKind::LessThan,
            Constraint::LessThanEqual(_) => ConstraintKind::LessThanEqual,
            Constraint::IsInstanceOf(_) => ConstraintKind::IsInstanceOf,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The compared value as it appears on the wire; `None` for `isEmpty`.
    pub fn compared_value(&self) -> Option<Value> {
        match self {
            Constraint::Equals(v)
            | Constraint::NotEquals(v)
            | Constraint::Same(v)
            | Constraint::NotSame(v)
            | Constraint::GreaterThan(v)
            | Constraint::GreaterThanEqual(v)
            | Constraint::LessThan(v)
            | Constraint::LessThanEqual(v) => Some(v.clone()),
            Constraint::StartsWith(s)
            | Constraint::EndsWith(s)
            | Constraint::Contains(s)
            | Constraint::Matches(s)
            | Constraint::KeyExists(s)
            | Constraint::KeyNotExists(s)
            | Constraint::IsInstanceOf(s) => Some(Value::String(s.clone())),
            Constraint::In(values) => Some(Value::Array(values.clone())),
            Constraint::IsEmpty => None,
        }
    }

    /// Rebuild a constraint from its kind and wire value.
    ///
    /// The error message describes what the kind expected; callers wrap it
    /// into their own error type.
    pub fn from_parts(kind: ConstraintKind, value: Option<Value>) -> Result<Constraint, String> {
        let name = kind.name();
        let string = |value: Option<Value>| match value {
            Some(Value::String(s)) => Ok(s),
            other => Err(format!("{} expects a string, got {:?}", name, other)),
        };
        let scalar = |value: Option<Value>| match value {
            Some(v) if v.is_scalar() => Ok(v),
            Some(Value::Array(items)) if items.iter().all(Value::is_scalar) => {
                Ok(Value::Array(items))
            }
            other => Err(format!(
                "{} expects a scalar or a list of scalars, got {:?}",
                name, other
            )),
        };

        Ok(match kind {
            ConstraintKind::Equals => Constraint::Equals(scalar(value)?),
            ConstraintKind::NotEquals => Constraint::NotEquals(scalar(value)?),
            ConstraintKind::Same => Constraint::Same(scalar(value)?),
            ConstraintKind::NotSame => Constraint::NotSame(scalar(value)?),
            ConstraintKind::GreaterThan => Constraint::GreaterThan(scalar(value)?),
            ConstraintKind::GreaterThanEqual => Constraint::GreaterThanEqual(scalar(value)?),
            ConstraintKind::LessThan => Constraint::LessThan(scalar(value)?),
            ConstraintKind::LessThanEqual => Constraint::LessThanEqual(scalar(value)?),
            ConstraintKind::StartsWith => Constraint::StartsWith(string(value)?),
            ConstraintKind::EndsWith => Constraint::EndsWith(string(value)?),
            ConstraintKind::Contains => Constraint::Contains(string(value)?),
            ConstraintKind::Matches => Constraint::Matches(string(value)?),
            ConstraintKind::KeyExists => Constraint::KeyExists(string(value)?),
            ConstraintKind::KeyNotExists => Constraint::KeyNotExists(string(value)?),
            ConstraintKind::IsInstanceOf => Constraint::IsInstanceOf(string(value)?),
            ConstraintKind::In => match value {
                Some(Value::Array(items)) if items.iter().all(Value::is_scalar) => {
                    Constraint::In(items)
                }
                other => {
                    return Err(format!("in expects a list of scalars, got {:?}", other));
                }
            },
            ConstraintKind::IsEmpty => match value {
                None | Some(Value::Null) => Constraint::IsEmpty,
                Some(other) => return Err(format!("isEmpty takes no value, got {:?}", other)),
            },
        })
    }
}
