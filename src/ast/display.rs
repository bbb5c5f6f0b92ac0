//! Default human-readable rendering of expression trees.
//!
//! This rendering is for diagnostics and tests; the wire grammar lives in
//! [`crate::codec::text`].

use std::fmt;

use crate::ast::{Constraint, Expr};
use crate::literal::{quote, to_literal};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Tautology => write!(f, "true"),
            Expr::Contradiction => write!(f, "false"),
            Expr::Conjunction(children) => write_junction(f, children, " && ", "true", |child| {
                matches!(child, Expr::Disjunction(_))
            }),
            Expr::Disjunction(children) => write_junction(f, children, " || ", "false", |child| {
                matches!(child, Expr::Conjunction(_))
            }),
            Expr::Negation(expr) => write!(f, "not({})", expr),
            Expr::Key { key, expr } => write_selected(f, key, expr),
            Expr::Property { name, expr } => write_selected(f, name, expr),
            Expr::PropertyPath { path, expr } => write_selected(f, path, expr),
            Expr::Method { name, args, expr } => {
                let args: Vec<String> = args.iter().map(to_literal).collect();
                write_selected(f, &format!("{}({})", name, args.join(", ")), expr)
            }
            Expr::All(expr) => write_selected(f, "all", expr),
            Expr::AtLeast { count, expr } => write_selected(f, &format!("atLeast({})", count), expr),
            Expr::AtMost { count, expr } => write_selected(f, &format!("atMost({})", count), expr),
            Expr::Exactly { count, expr } => write_selected(f, &format!("exactly({})", count), expr),
            Expr::Count(expr) => write_selected(f, "count", expr),
            Expr::Constraint(constraint) => write!(f, "{}", constraint),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Equals(v) => write!(f, "=={}", to_literal(v)),
            Constraint::NotEquals(v) => write!(f, "!={}", to_literal(v)),
            Constraint::Same(v) => write!(f, "==={}", to_literal(v)),
            Constraint::NotSame(v) => write!(f, "!=={}", to_literal(v)),
            Constraint::GreaterThan(v) => write!(f, ">{}", to_literal(v)),
            Constraint::GreaterThanEqual(v) => write!(f, ">={}", to_literal(v)),
            Constraint::LessThan(v) => write!(f, "<{}", to_literal(v)),
            Constraint::LessThanEqual(v) => write!(f, "<={}", to_literal(v)),
            Constraint::StartsWith(s) => write!(f, "startsWith({})", quote(s)),
            Constraint::EndsWith(s) => write!(f, "endsWith({})", quote(s)),
            Constraint::Contains(s) => write!(f, "contains({})", quote(s)),
            Constraint::Matches(s) => write!(f, "matches({})", quote(s)),
            Constraint::In(values) => {
                let values: Vec<String> = values.iter().map(to_literal).collect();
                write!(f, "in({})", values.join(", "))
            }
            Constraint::KeyExists(k) => write!(f, "keyExists({})", quote(k)),
            Constraint::KeyNotExists(k) => write!(f, "keyNotExists({})", quote(k)),
            Constraint::IsEmpty => write!(f, "empty()"),
            Constraint::IsInstanceOf(t) => write!(f, "instanceOf({})", quote(t)),
        }
    }
}

fn write_junction(
    f: &mut fmt::Formatter<'_>,
    children: &[Expr],
    separator: &str,
    when_empty: &str,
    needs_parens: impl Fn(&Expr) -> bool,
) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "{}", when_empty);
    }

    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(child) {
            write!(f, "({})", child)?;
        } else {
            write!(f, "{}", child)?;
        }
    }
    Ok(())
}

/// Selector rendering: `name{a && b}` around junctions, `name.call(...)` when
/// the child reads like a function call, `name>10` otherwise.
fn write_selected(f: &mut fmt::Formatter<'_>, prefix: &str, expr: &Expr) -> fmt::Result {
    if expr.is_junction() {
        return write!(f, "{}{{{}}}", prefix, expr);
    }

    let rendered = expr.to_string();
    if rendered.starts_with(|c: char| c.is_alphabetic()) {
        write!(f, "{}.{}", prefix, rendered)
    } else {
        write!(f, "{}{}", prefix, rendered)
    }
}
