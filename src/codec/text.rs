use tracing::trace;

use crate::{
    ast::{Constraint, Expr},
    codec::CodecError,
    lexer::{Lexer, is_bare_identifier},
    literal::{is_representable, quote, to_literal},
    parser::Parser,
    value::Value,
};

/// Converts trees to and from the function-call grammar.
///
/// ```text
/// and(key(firstname, equals("John")), key(lastname, equals("Doe")))
/// ```
///
/// Encoding writes every node kind explicitly and decoding reads every kind
/// back, so `decode(encode(x)) == x` for all trees whose values are
/// representable.
///
/// # Examples
///
/// ```
/// use fieldexpr::{Constraint, Expr, TextCodec, Value};
///
/// let expr = Expr::and(vec![
///     Expr::key("firstname", Constraint::Equals(Value::from("John"))),
///     Expr::key("lastname", Constraint::Equals(Value::from("Doe"))),
/// ]);
///
/// let text = TextCodec::encode(&expr).unwrap();
/// assert_eq!(text, r#"and(key(firstname, equals("John")), key(lastname, equals("Doe")))"#);
/// assert_eq!(TextCodec::decode(&text).unwrap(), expr);
/// ```
pub struct TextCodec;

impl TextCodec {
    pub fn encode(expr: &Expr) -> Result<String, CodecError> {
        let mut out = String::new();
        write_expr(&mut out, expr)?;
        Ok(out)
    }

    pub fn decode(text: &str) -> Result<Expr, CodecError> {
        trace!(text, "decoding text expression");
        let mut parser = Parser::new(Lexer::new(text))?;
        Ok(parser.parse()?)
    }
}

fn write_expr(out: &mut String, expr: &Expr) -> Result<(), CodecError> {
    match expr {
        Expr::Tautology => out.push_str("true()"),
        Expr::Contradiction => out.push_str("false()"),
        Expr::Conjunction(children) => write_call(out, "and", children)?,
        Expr::Disjunction(children) => write_call(out, "or", children)?,
        Expr::Negation(inner) => write_unary(out, "not", inner)?,

        Expr::Key { key, expr } => write_selector(out, "key", key, expr)?,
        Expr::Property { name, expr } => write_selector(out, "property", name, expr)?,
        Expr::PropertyPath { path, expr } => write_selector(out, "propertyPath", path, expr)?,
        Expr::Method { name, args, expr } => {
            out.push_str("method(");
            out.push_str(&write_name(name));
            for arg in args {
                out.push_str(", ");
                out.push_str(&write_value(arg)?);
            }
            out.push_str(", ");
            write_expr(out, expr)?;
            out.push(')');
        }

        Expr::All(inner) => write_unary(out, "all", inner)?,
        Expr::Count(inner) => write_unary(out, "count", inner)?,
        Expr::AtLeast { count, expr } => write_quantifier(out, "atLeast", *count, expr)?,
        Expr::AtMost { count, expr } => write_quantifier(out, "atMost", *count, expr)?,
        Expr::Exactly { count, expr } => write_quantifier(out, "exactly", *count, expr)?,

        Expr::Constraint(constraint) => write_constraint(out, constraint)?,
    }
    Ok(())
}

fn write_call(out: &mut String, name: &str, children: &[Expr]) -> Result<(), CodecError> {
    out.push_str(name);
    out.push('(');
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, child)?;
    }
    out.push(')');
    Ok(())
}

fn write_unary(out: &mut String, name: &str, inner: &Expr) -> Result<(), CodecError> {
    write_call(out, name, std::slice::from_ref(inner))
}

fn write_selector(out: &mut String, selector: &str, field: &str, expr: &Expr) -> Result<(), CodecError> {
    out.push_str(selector);
    out.push('(');
    out.push_str(&write_name(field));
    out.push_str(", ");
    write_expr(out, expr)?;
    out.push(')');
    Ok(())
}

fn write_quantifier(out: &mut String, name: &str, count: usize, expr: &Expr) -> Result<(), CodecError> {
    out.push_str(name);
    out.push('(');
    out.push_str(&count.to_string());
    out.push_str(", ");
    write_expr(out, expr)?;
    out.push(')');
    Ok(())
}

fn write_constraint(out: &mut String, constraint: &Constraint) -> Result<(), CodecError> {
    out.push_str(constraint.kind().text_name());
    out.push('(');
    match constraint {
        // `in` spreads its list over the argument list
        Constraint::In(values) => {
            let values = values.iter().map(write_value).collect::<Result<Vec<_>, _>>()?;
            out.push_str(&values.join(", "));
        }
        other => {
            if let Some(value) = other.compared_value() {
                out.push_str(&write_value(&value)?);
            }
        }
    }
    out.push(')');
    Ok(())
}

fn write_value(value: &Value) -> Result<String, CodecError> {
    if !is_representable(value) {
        return Err(CodecError::UnrepresentableValue(to_literal(value)));
    }
    Ok(to_literal(value))
}

fn write_name(name: &str) -> String {
    if is_bare_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}
