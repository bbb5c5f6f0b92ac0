use crate::ast::Constraint;
use crate::value::Value;

/// A node of a filter expression tree.
///
/// Trees are built once and never mutated; every child is owned by exactly
/// one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Logic leaves
    /// Always true (`true()`)
    Tautology,

    /// Always false (`false()`)
    Contradiction,

    // Junctions
    /// All children must hold
    ///
    /// # Example
    /// ```text
    /// and(key(firstname, equals("John")), key(lastname, equals("Doe")))
    /// ```
    Conjunction(Vec<Expr>),

    /// At least one child must hold
    Disjunction(Vec<Expr>),

    /// Inverts its child
    Negation(Box<Expr>),

    // Field selectors
    /// Narrows to an array key or object key
    ///
    /// # Example
    /// ```text
    /// key(firstname, equals("John"))
    /// ```
    Key { key: String, expr: Box<Expr> },

    /// Narrows to a single named property of the host
    Property { name: String, expr: Box<Expr> },

    /// Narrows to a dotted property path (`user.address.city`)
    PropertyPath { path: String, expr: Box<Expr> },

    /// Narrows to the result of calling a method with arguments
    ///
    /// # Example
    /// ```text
    /// method(length, greaterThan(3))
    /// ```
    Method {
        name: String,
        args: Vec<Value>,
        expr: Box<Expr>,
    },

    // Quantifiers over collections
    /// Every element satisfies the child
    All(Box<Expr>),

    /// At least `count` elements satisfy the child
    AtLeast { count: usize, expr: Box<Expr> },

    /// At most `count` elements satisfy the child
    AtMost { count: usize, expr: Box<Expr> },

    /// Exactly `count` elements satisfy the child
    Exactly { count: usize, expr: Box<Expr> },

    /// The number of elements satisfies the child
    Count(Box<Expr>),

    /// Comparison leaf
    Constraint(Constraint),
}

impl From<Constraint> for Expr {
    fn from(constraint: Constraint) -> Self {
        Expr::Constraint(constraint)
    }
}

impl Expr {
    pub fn and(children: Vec<Expr>) -> Self {
        Expr::Conjunction(children)
    }

    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Disjunction(children)
    }

    pub fn not(expr: impl Into<Expr>) -> Self {
        Expr::Negation(Box::new(expr.into()))
    }

    pub fn key(key: impl Into<String>, expr: impl Into<Expr>) -> Self {
        Expr::Key {
            key: key.into(),
            expr: Box::new(expr.into()),
        }
    }

    pub fn property(name: impl Into<String>, expr: impl Into<Expr>) -> Self {
        Expr::Property {
            name: name.into(),
            expr: Box::new(expr.into()),
        }
    }

    pub fn property_path(path: impl Into<String>, expr: impl Into<Expr>) -> Self {
        Expr::PropertyPath {
            path: path.into(),
            expr: Box::new(expr.into()),
        }
    }

    pub fn method(name: impl Into<String>, args: Vec<Value>, expr: impl Into<Expr>) -> Self {
        Expr::Method {
            name: name.into(),
            args,
            expr: Box::new(expr.into()),
        }
    }

    /// Structural equivalence: same kinds, same names and values, equivalent
    /// children in the same order.
    pub fn equivalent_to(&self, other: &Expr) -> bool {
        self == other
    }

    /// Wire name of the node kind. Constraints report their own name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Tautology => "true",
            Expr::Contradiction => "false",
            Expr::Conjunction(_) => "and",
            Expr::Disjunction(_) => "or",
            Expr::Negation(_) => "not",
            Expr::Key { .. } => "key",
            Expr::Property { .. } => "property",
            Expr::PropertyPath { .. } => "propertyPath",
            Expr::Method { .. } => "method",
            Expr::All(_) => "all",
            Expr::AtLeast { .. } => "atLeast",
            Expr::AtMost { .. } => "atMost",
            Expr::Exactly { .. } => "exactly",
            Expr::Count(_) => "count",
            Expr::Constraint(c) => c.name(),
        }
    }

    /// Selector that narrows to a named field (key, property, property path),
    /// returning the field name.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Expr::Key { key, .. } => Some(key),
            Expr::Property { name, .. } => Some(name),
            Expr::PropertyPath { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Is this node a conjunction or disjunction?
    pub fn is_junction(&self) -> bool {
        matches!(self, Expr::Conjunction(_) | Expr::Disjunction(_))
    }
}
