//! Lowering expression trees into backend query predicates.
//!
//! The compiler walks the tree once. Field selectors (`key`, `property`,
//! `propertyPath`) set the field that the constraints below them compare; a
//! second field selector below the first is rejected, as are quantifiers,
//! method selectors and constraints with no SQL counterpart.
//!
//! Junction children are combined last-compiled-first: `or(a, b)` becomes
//! `b OR a`.

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Constraint, Expr},
    value::Value,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Quantifier or method selector
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(&'static str),

    /// Constraint with no backend operator
    #[error("unsupported constraint: {0}")]
    UnsupportedConstraint(&'static str),

    #[error("unsupported: nested field selector '{inner}' inside '{outer}'")]
    NestedFieldSelector { outer: String, inner: String },

    #[error("unsupported: constraint without field ({0})")]
    ConstraintWithoutField(&'static str),
}

/// Backend that accumulates predicates.
///
/// Operands are passed as already-rendered text: field expressions like
/// `m.channel` on the left, [`literal`](QueryBuilder::literal)-escaped values
/// on the right.
pub trait QueryBuilder {
    type Predicate;

    /// Escapes a value for use as an operand.
    fn literal(&self, value: &Value) -> String;

    fn eq(&self, left: &str, right: &str) -> Self::Predicate;
    fn neq(&self, left: &str, right: &str) -> Self::Predicate;
    fn gt(&self, left: &str, right: &str) -> Self::Predicate;
    fn gte(&self, left: &str, right: &str) -> Self::Predicate;
    fn lt(&self, left: &str, right: &str) -> Self::Predicate;
    fn lte(&self, left: &str, right: &str) -> Self::Predicate;
    fn like(&self, left: &str, pattern: &str) -> Self::Predicate;
    fn in_list(&self, left: &str, values: Vec<String>) -> Self::Predicate;

    fn not(&self, predicate: Self::Predicate) -> Self::Predicate;
    fn and(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
    fn or(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;

    /// Attaches a predicate as filter, conjoined with any existing one.
    fn and_where(&mut self, predicate: Self::Predicate);
}

/// Compiles trees against one query alias.
///
/// # Examples
///
/// ```
/// use fieldexpr::{Constraint, Expr, QueryCompiler, SqlQuery, Value};
///
/// let expr = Expr::or(vec![
///     Expr::key("channel", Constraint::Equals(Value::from("element"))),
///     Expr::key("channel", Constraint::Equals(Value::from("user"))),
/// ]);
///
/// let mut query = SqlQuery::new("messages", "m");
/// QueryCompiler::new("m").apply(&expr, &mut query).unwrap();
///
/// assert_eq!(
///     query.filter().unwrap().to_string(),
///     "m.channel = 'user' OR m.channel = 'element'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    alias: String,
}

impl QueryCompiler {
    pub fn new(alias: impl Into<String>) -> Self {
        QueryCompiler {
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Compiles the tree and attaches it to the builder's filter.
    pub fn apply<B: QueryBuilder>(&self, expr: &Expr, builder: &mut B) -> Result<(), CompileError> {
        let predicate = self.compile(expr, builder)?;
        builder.and_where(predicate);
        Ok(())
    }

    /// Compiles the tree into a single predicate without attaching it.
    pub fn compile<B: QueryBuilder>(&self, expr: &Expr, builder: &B) -> Result<B::Predicate, CompileError> {
        self.compile_node(expr, None, builder).inspect_err(|e| {
            debug!(error = %e, alias = %self.alias, "expression rejected by query compiler");
        })
    }

    fn compile_node<B: QueryBuilder>(
        &self,
        expr: &Expr,
        field: Option<&str>,
        builder: &B,
    ) -> Result<B::Predicate, CompileError> {
        match expr {
            Expr::Tautology => Ok(builder.eq("1", "1")),
            Expr::Contradiction => Ok(builder.eq("1", "0")),

            Expr::Conjunction(children) => {
                if children.is_empty() {
                    return Ok(builder.eq("1", "1"));
                }
                let parts = self.compile_children(children, field, builder)?;
                Ok(builder.and(parts))
            }
            Expr::Disjunction(children) => {
                if children.is_empty() {
                    return Ok(builder.eq("1", "0"));
                }
                let parts = self.compile_children(children, field, builder)?;
                Ok(builder.or(parts))
            }
            Expr::Negation(inner) => Ok(builder.not(self.compile_node(inner, field, builder)?)),

            Expr::Key { key: name, expr }
            | Expr::Property { name, expr }
            | Expr::PropertyPath { path: name, expr } => {
                if let Some(outer) = field {
                    return Err(CompileError::NestedFieldSelector {
                        outer: outer.to_string(),
                        inner: name.clone(),
                    });
                }
                trace!(field = %name, "entering field selector");
                self.compile_node(expr, Some(name.as_str()), builder)
            }

            Expr::Method { .. }
            | Expr::All(_)
            | Expr::AtLeast { .. }
            | Expr::AtMost { .. }
            | Expr::Exactly { .. }
            | Expr::Count(_) => Err(CompileError::UnsupportedSelector(expr.kind_name())),

            Expr::Constraint(constraint) => {
                let field = field.ok_or(CompileError::ConstraintWithoutField(constraint.name()))?;
                self.compile_constraint(constraint, field, builder)
            }
        }
    }

    /// Compiles children in source order and returns them last-first.
    fn compile_children<B: QueryBuilder>(
        &self,
        children: &[Expr],
        field: Option<&str>,
        builder: &B,
    ) -> Result<Vec<B::Predicate>, CompileError> {
        let mut parts = children
            .iter()
            .map(|child| self.compile_node(child, field, builder))
            .collect::<Result<Vec<_>, _>>()?;
        parts.reverse();
        Ok(parts)
    }

    fn compile_constraint<B: QueryBuilder>(
        &self,
        constraint: &Constraint,
        field: &str,
        builder: &B,
    ) -> Result<B::Predicate, CompileError> {
        let column = format!("{}.{}", self.alias, field);
        let literal = |value: &Value| builder.literal(value);

        Ok(match constraint {
            Constraint::Equals(v) | Constraint::Same(v) => builder.eq(&column, &literal(v)),
            Constraint::NotEquals(v) | Constraint::NotSame(v) => builder.neq(&column, &literal(v)),
            Constraint::GreaterThan(v) => builder.gt(&column, &literal(v)),
            Constraint::GreaterThanEqual(v) => builder.gte(&column, &literal(v)),
            Constraint::LessThan(v) => builder.lt(&column, &literal(v)),
            Constraint::LessThanEqual(v) => builder.lte(&column, &literal(v)),
            Constraint::Contains(s) => {
                builder.like(&column, &literal(&Value::String(format!("%{}%", s))))
            }
            Constraint::StartsWith(s) => {
                builder.like(&column, &literal(&Value::String(format!("{}%", s))))
            }
            // `=` against a wildcard literal, not LIKE
            Constraint::EndsWith(s) => builder.eq(&column, &literal(&Value::String(format!("%{}", s)))),
            Constraint::In(values) => builder.in_list(&column, values.iter().map(literal).collect()),
            Constraint::IsEmpty
            | Constraint::KeyExists(_)
            | Constraint::KeyNotExists(_)
            | Constraint::Matches(_)
            | Constraint::IsInstanceOf(_) => {
                return Err(CompileError::UnsupportedConstraint(constraint.name()));
            }
        })
    }
}
