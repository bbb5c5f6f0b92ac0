//! SQL text backend for the query compiler.
//!
//! Predicates render the way DQL expression builders print them: parts of a
//! composite are joined with ` AND ` / ` OR `, a nested composite with more
//! than one part is parenthesized, and a composite with a single part prints
//! as that part.

use std::fmt;

use crate::{compiler::QueryBuilder, literal::to_literal, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlPredicate {
    /// Rendered comparison, e.g. `m.age > 18`
    Comparison(String),
    And(Vec<SqlPredicate>),
    Or(Vec<SqlPredicate>),
    Not(Box<SqlPredicate>),
}

impl SqlPredicate {
    fn is_composite(&self) -> bool {
        match self {
            SqlPredicate::And(parts) | SqlPredicate::Or(parts) => parts.len() > 1,
            _ => false,
        }
    }
}

impl fmt::Display for SqlPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (separator, parts) = match self {
            SqlPredicate::Comparison(sql) => return f.write_str(sql),
            SqlPredicate::Not(inner) => return write!(f, "NOT({})", inner),
            SqlPredicate::And(parts) => (" AND ", parts),
            SqlPredicate::Or(parts) => (" OR ", parts),
        };

        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            if part.is_composite() {
                write!(f, "({})", part)?;
            } else {
                write!(f, "{}", part)?;
            }
        }
        Ok(())
    }
}

/// A `SELECT` over one aliased table with an optional filter.
///
/// # Examples
///
/// ```
/// use fieldexpr::{Constraint, Expr, QueryCompiler, SqlQuery, Value};
///
/// let mut query = SqlQuery::new("users", "u");
/// let expr = Expr::key("age", Constraint::GreaterThanEqual(Value::Integer(18)));
/// QueryCompiler::new("u").apply(&expr, &mut query).unwrap();
///
/// assert_eq!(query.to_sql(), "SELECT u FROM users u WHERE u.age >= 18");
/// ```
#[derive(Debug, Clone)]
pub struct SqlQuery {
    table: String,
    alias: String,
    filter: Option<SqlPredicate>,
}

impl SqlQuery {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        SqlQuery {
            table: table.into(),
            alias: alias.into(),
            filter: None,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn filter(&self) -> Option<&SqlPredicate> {
        self.filter.as_ref()
    }

    pub fn to_sql(&self) -> String {
        match &self.filter {
            Some(filter) => format!(
                "SELECT {} FROM {} {} WHERE {}",
                self.alias, self.table, self.alias, filter
            ),
            None => format!("SELECT {} FROM {} {}", self.alias, self.table, self.alias),
        }
    }

    fn comparison(left: &str, operator: &str, right: &str) -> SqlPredicate {
        SqlPredicate::Comparison(format!("{} {} {}", left, operator, right))
    }
}

impl QueryBuilder for SqlQuery {
    type Predicate = SqlPredicate;

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Null => "NULL".to_string(),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|item| self.literal(item)).collect();
                format!("({})", items.join(", "))
            }
            other => to_literal(other),
        }
    }

    fn eq(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, "=", right)
    }

    fn neq(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, "<>", right)
    }

    fn gt(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, ">", right)
    }

    fn gte(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, ">=", right)
    }

    fn lt(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, "<", right)
    }

    fn lte(&self, left: &str, right: &str) -> SqlPredicate {
        Self::comparison(left, "<=", right)
    }

    fn like(&self, left: &str, pattern: &str) -> SqlPredicate {
        Self::comparison(left, "LIKE", pattern)
    }

    fn in_list(&self, left: &str, values: Vec<String>) -> SqlPredicate {
        SqlPredicate::Comparison(format!("{} IN({})", left, values.join(", ")))
    }

    fn not(&self, predicate: SqlPredicate) -> SqlPredicate {
        SqlPredicate::Not(Box::new(predicate))
    }

    fn and(&self, predicates: Vec<SqlPredicate>) -> SqlPredicate {
        SqlPredicate::And(predicates)
    }

    fn or(&self, predicates: Vec<SqlPredicate>) -> SqlPredicate {
        SqlPredicate::Or(predicates)
    }

    fn and_where(&mut self, predicate: SqlPredicate) {
        self.filter = Some(match self.filter.take() {
            None => predicate,
            Some(SqlPredicate::And(mut parts)) => {
                parts.push(predicate);
                SqlPredicate::And(parts)
            }
            Some(existing) => SqlPredicate::And(vec![existing, predicate]),
        });
    }
}
