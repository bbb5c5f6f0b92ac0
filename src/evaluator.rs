use std::{cmp::Ordering, collections::HashMap};

use regex::Regex;
use tracing::debug;

use crate::{
    access::{PropertyAccess, read_path},
    ast::{Constraint, Expr},
    value::{Value, type_name},
};

/// Evaluates expression trees against hosts.
///
/// Evaluation never fails: a selector whose field cannot be read, a
/// quantifier applied to a scalar, or a constraint applied to a value of the
/// wrong type all evaluate to `false`.
///
/// The evaluator caches compiled `matches(...)` patterns, so reusing one
/// evaluator across many documents avoids recompiling them.
///
/// # Examples
///
/// ```
/// use fieldexpr::{Constraint, Evaluator, Expr, Value};
/// use std::collections::HashMap;
///
/// let mut doc = HashMap::new();
/// doc.insert("price".to_string(), Value::Integer(100));
///
/// let expr = Expr::key("price", Constraint::GreaterThan(Value::Integer(50)));
///
/// let mut evaluator = Evaluator::new();
/// assert!(evaluator.evaluate(&expr, &Value::Object(doc)));
/// ```
#[derive(Default)]
pub struct Evaluator {
    /// Compiled patterns; `None` marks a pattern that failed to compile
    regexes: HashMap<String, Option<Regex>>,
}

impl Expr {
    /// Evaluates the tree against a value.
    pub fn evaluate(&self, value: &Value) -> bool {
        Evaluator::new().evaluate(self, value)
    }

    /// Evaluates the tree against any host that exposes its fields.
    pub fn evaluate_on<H: PropertyAccess + ?Sized>(&self, host: &H) -> bool {
        Evaluator::new().evaluate(self, host)
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate<H: PropertyAccess + ?Sized>(&mut self, expr: &Expr, host: &H) -> bool {
        match expr {
            Expr::Tautology => true,
            Expr::Contradiction => false,
            Expr::Conjunction(children) => children.iter().all(|child| self.evaluate(child, host)),
            Expr::Disjunction(children) => children.iter().any(|child| self.evaluate(child, host)),
            Expr::Negation(inner) => !self.evaluate(inner, host),

            Expr::Key { key, expr } => match host.field(key) {
                Some(value) => self.evaluate(expr, &value),
                None => false,
            },
            Expr::Property { name, expr } => match host.read_property(name) {
                Some(value) => self.evaluate(expr, &value),
                None => false,
            },
            Expr::PropertyPath { path, expr } => self.evaluate_property_path(path, expr, host),
            Expr::Method { name, args, expr } => match host.call_method(name, args) {
                Some(value) => self.evaluate(expr, &value),
                None => false,
            },

            Expr::All(inner) => match host.as_value().and_then(elements) {
                Some(items) => items.into_iter().all(|item| self.evaluate(inner, item)),
                None => false,
            },
            Expr::AtLeast { count, expr } => self
                .count_matching(expr, host)
                .is_some_and(|matching| matching >= *count),
            Expr::AtMost { count, expr } => self
                .count_matching(expr, host)
                .is_some_and(|matching| matching <= *count),
            Expr::Exactly { count, expr } => self
                .count_matching(expr, host)
                .is_some_and(|matching| matching == *count),
            Expr::Count(inner) => match host.as_value().and_then(elements) {
                Some(items) => self.evaluate(inner, &Value::Integer(items.len() as i64)),
                None => false,
            },

            Expr::Constraint(constraint) => match host.as_value() {
                Some(value) => self.check(constraint, value),
                None => false,
            },
        }
    }

    /// Reads `path` from the host and evaluates `expr` against the result.
    /// An unreadable path is `false`, not an error.
    pub fn evaluate_property_path<H: PropertyAccess + ?Sized>(
        &mut self,
        path: &str,
        expr: &Expr,
        host: &H,
    ) -> bool {
        match read_path(host, path) {
            Some(value) => self.evaluate(expr, &value),
            None => false,
        }
    }

    fn count_matching<H: PropertyAccess + ?Sized>(&mut self, expr: &Expr, host: &H) -> Option<usize> {
        let items = host.as_value().and_then(elements)?;
        Some(items.into_iter().filter(|item| self.evaluate(expr, *item)).count())
    }

    /// Applies a single constraint to a value.
    pub fn check(&mut self, constraint: &Constraint, value: &Value) -> bool {
        match constraint {
            Constraint::Equals(expected) => loose_eq(value, expected),
            Constraint::NotEquals(expected) => !loose_eq(value, expected),
            Constraint::Same(expected) => value == expected,
            Constraint::NotSame(expected) => value != expected,
            Constraint::GreaterThan(bound) => compare_values(value, bound) == Some(Ordering::Greater),
            Constraint::GreaterThanEqual(bound) => matches!(
                compare_values(value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Constraint::LessThan(bound) => compare_values(value, bound) == Some(Ordering::Less),
            Constraint::LessThanEqual(bound) => matches!(
                compare_values(value, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Constraint::StartsWith(prefix) => value.as_str().is_some_and(|s| s.starts_with(prefix.as_str())),
            Constraint::EndsWith(suffix) => value.as_str().is_some_and(|s| s.ends_with(suffix.as_str())),
            Constraint::Contains(needle) => value.as_str().is_some_and(|s| s.contains(needle.as_str())),
            Constraint::Matches(pattern) => match value.as_str() {
                Some(s) => self.regex(pattern).is_some_and(|re| re.is_match(s)),
                None => false,
            },
            Constraint::In(candidates) => candidates.iter().any(|c| loose_eq(value, c)),
            Constraint::KeyExists(key) => has_key(value, key) == Some(true),
            Constraint::KeyNotExists(key) => has_key(value, key) == Some(false),
            Constraint::IsEmpty => value.is_empty(),
            Constraint::IsInstanceOf(expected) => {
                let actual = type_name(value);
                actual == expected.as_str()
                    || (expected == "number" && matches!(value, Value::Integer(_) | Value::Float(_)))
            }
        }
    }

    fn regex(&mut self, pattern: &str) -> Option<&Regex> {
        self.regexes
            .entry(pattern.to_string())
            .or_insert_with(|| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    debug!(pattern, error = %e, "invalid regex in matches constraint");
                    None
                }
            })
            .as_ref()
    }
}

/// Elements a quantifier ranges over: array items or object values.
fn elements(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::Array(arr) => Some(arr.iter().collect()),
        Value::Object(obj) => Some(obj.values().collect()),
        _ => None,
    }
}

/// Key presence for collections; `None` for scalars.
fn has_key(value: &Value, key: &str) -> Option<bool> {
    match value {
        Value::Object(obj) => Some(obj.contains_key(key)),
        Value::Array(arr) => Some(key.parse::<usize>().is_ok_and(|i| i < arr.len())),
        _ => None,
    }
}

/// Equality that treats `1` and `1.0` as equal.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            compare_numbers(a, b) == Some(Ordering::Equal)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| loose_eq(x, y))
        }
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            compare_numbers(a, b)
        }
        _ => None,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => {
            if let Some(ad) = a.as_decimal()
                && let Some(bd) = b.as_decimal()
            {
                return Some(ad.cmp(&bd));
            }
            a.as_float()?.partial_cmp(&b.as_float()?)
        }
    }
}
