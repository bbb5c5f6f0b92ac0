use serde_json::{Map, Value as Json, json};
use tracing::trace;

use crate::{
    ast::{Constraint, ConstraintKind, Expr},
    codec::{CodecError, CodecOptions},
    literal::to_literal,
    parser::MAX_NESTING_DEPTH,
    value::Value,
};

/// Converts trees to and from nested maps.
///
/// Every node becomes a JSON object tagged by exactly one of `logic`,
/// `selector` or `constraint`:
///
/// ```text
/// {"logic": "and", "conjuncts": [
///     {"selector": "key", "key": "firstname",
///      "expression": {"constraint": "equals", "value": "John"}}
/// ]}
/// ```
///
/// # Examples
///
/// ```
/// use fieldexpr::{ArrayCodec, Constraint, Expr, Value};
///
/// let codec = ArrayCodec::new();
/// let expr = Expr::key("firstname", Constraint::Equals(Value::from("John")));
///
/// let encoded = codec.encode(&expr).unwrap();
/// assert_eq!(encoded["selector"], "key");
/// assert_eq!(codec.decode(&encoded).unwrap(), expr);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCodec {
    options: CodecOptions,
}

impl ArrayCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        ArrayCodec { options }
    }

    pub fn encode(&self, expr: &Expr) -> Result<Json, CodecError> {
        Ok(match expr {
            Expr::Tautology => json!({ "logic": "true" }),
            Expr::Contradiction => json!({ "logic": "false" }),
            Expr::Conjunction(children) => json!({
                "logic": "and",
                "conjuncts": self.encode_all(children)?,
            }),
            Expr::Disjunction(children) => json!({
                "logic": "or",
                "disjuncts": self.encode_all(children)?,
            }),
            Expr::Negation(inner) => json!({
                "logic": "not",
                "negatedExpression": self.encode(inner)?,
            }),

            Expr::Key { key, expr } => json!({
                "selector": "key",
                "key": key,
                "expression": self.encode(expr)?,
            }),
            Expr::Property { name, expr } => json!({
                "selector": "property",
                "propertyName": name,
                "expression": self.encode(expr)?,
            }),
            Expr::PropertyPath { path, expr } => json!({
                "selector": "propertyPath",
                "propertyPath": path,
                "expression": self.encode(expr)?,
            }),
            Expr::Method { name, args, expr } => json!({
                "selector": "method",
                "methodName": name,
                "arguments": args.iter().map(encode_value).collect::<Result<Vec<_>, _>>()?,
                "expression": self.encode(expr)?,
            }),

            Expr::All(inner) => self.encode_quantifier("all", 0, inner)?,
            Expr::AtLeast { count, expr } => self.encode_quantifier("atLeast", *count, expr)?,
            Expr::AtMost { count, expr } => self.encode_quantifier("atMost", *count, expr)?,
            Expr::Exactly { count, expr } => self.encode_quantifier("exactly", *count, expr)?,
            Expr::Count(inner) => self.encode_quantifier("count", 0, inner)?,

            Expr::Constraint(constraint) => encode_constraint(constraint)?,
        })
    }

    fn encode_all(&self, children: &[Expr]) -> Result<Vec<Json>, CodecError> {
        children.iter().map(|child| self.encode(child)).collect()
    }

    fn encode_quantifier(&self, selector: &str, count: usize, expr: &Expr) -> Result<Json, CodecError> {
        let count = if self.options.lossy_quantifier_counts { 0 } else { count };
        Ok(json!({
            "selector": selector,
            "count": count,
            "expression": self.encode(expr)?,
        }))
    }

    pub fn decode(&self, data: &Json) -> Result<Expr, CodecError> {
        self.decode_at(data, 0)
    }

    fn decode_at(&self, data: &Json, depth: usize) -> Result<Expr, CodecError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(unsupported(format!(
                "expression nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }

        let map = data
            .as_object()
            .ok_or_else(|| unsupported(format!("expected a map, got {}", data)))?;

        if let Some(logic) = map.get("logic") {
            trace!(%logic, "decoding logic node");
            self.decode_logic(map, logic, depth)
        } else if let Some(selector) = map.get("selector") {
            trace!(%selector, "decoding selector node");
            self.decode_selector(map, selector, depth)
        } else if let Some(constraint) = map.get("constraint") {
            decode_constraint(map, constraint)
        } else {
            Err(unsupported(format!(
                "missing logic, selector or constraint key in {}",
                data
            )))
        }
    }

    fn decode_logic(&self, map: &Map<String, Json>, logic: &Json, depth: usize) -> Result<Expr, CodecError> {
        match logic.as_str() {
            Some("true") => Ok(Expr::Tautology),
            Some("false") => Ok(Expr::Contradiction),
            Some("and") => Ok(Expr::Conjunction(self.decode_list(map, "conjuncts", depth)?)),
            Some("or") => Ok(Expr::Disjunction(self.decode_list(map, "disjuncts", depth)?)),
            Some("not") => Ok(Expr::Negation(Box::new(
                self.decode_at(required(map, "negatedExpression")?, depth + 1)?,
            ))),
            _ => Err(unsupported(format!("unknown logic {}", logic))),
        }
    }

    fn decode_list(&self, map: &Map<String, Json>, key: &str, depth: usize) -> Result<Vec<Expr>, CodecError> {
        let items = required(map, key)?
            .as_array()
            .ok_or_else(|| unsupported(format!("'{}' must be a list", key)))?;
        items.iter().map(|item| self.decode_at(item, depth + 1)).collect()
    }

    fn decode_selector(&self, map: &Map<String, Json>, selector: &Json, depth: usize) -> Result<Expr, CodecError> {
        let expression = |map: &Map<String, Json>| -> Result<Box<Expr>, CodecError> {
            Ok(Box::new(self.decode_at(required(map, "expression")?, depth + 1)?))
        };

        match selector.as_str() {
            Some("key") => Ok(Expr::Key {
                key: required_string(map, "key")?,
                expr: expression(map)?,
            }),
            Some("property") => Ok(Expr::Property {
                name: required_string(map, "propertyName")?,
                expr: expression(map)?,
            }),
            Some("propertyPath") => Ok(Expr::PropertyPath {
                path: required_string(map, "propertyPath")?,
                expr: expression(map)?,
            }),
            Some("method") => {
                let args = required(map, "arguments")?
                    .as_array()
                    .ok_or_else(|| unsupported("'arguments' must be a list".to_string()))?
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::Method {
                    name: required_string(map, "methodName")?,
                    args,
                    expr: expression(map)?,
                })
            }
            Some("all") => Ok(Expr::All(expression(map)?)),
            Some("count") => Ok(Expr::Count(expression(map)?)),
            Some("atLeast") => Ok(Expr::AtLeast {
                count: required_count(map)?,
                expr: expression(map)?,
            }),
            Some("atMost") => Ok(Expr::AtMost {
                count: required_count(map)?,
                expr: expression(map)?,
            }),
            Some("exactly") => Ok(Expr::Exactly {
                count: required_count(map)?,
                expr: expression(map)?,
            }),
            _ => Err(unsupported(format!("unknown selector {}", selector))),
        }
    }
}

fn encode_constraint(constraint: &Constraint) -> Result<Json, CodecError> {
    let mut map = Map::new();
    map.insert("constraint".to_string(), Json::from(constraint.kind().array_name()));
    if let Some(value) = constraint.compared_value() {
        map.insert("value".to_string(), encode_value(&value)?);
    }
    Ok(Json::Object(map))
}

fn decode_constraint(map: &Map<String, Json>, name: &Json) -> Result<Expr, CodecError> {
    // shorthands for identity with null; any `value` is ignored
    match name.as_str() {
        Some("null") => return Ok(Constraint::Same(Value::Null).into()),
        Some("notNull") => return Ok(Constraint::NotSame(Value::Null).into()),
        _ => {}
    }

    let kind = name
        .as_str()
        .and_then(ConstraintKind::from_any_name)
        .ok_or_else(|| unsupported(format!("unknown constraint {}", name)))?;

    let value = match map.get("value") {
        Some(value) => Some(decode_value(value)?),
        None if kind.takes_value() => {
            return Err(unsupported(format!("constraint '{}' requires a value", kind.name())));
        }
        None => None,
    };

    Constraint::from_parts(kind, value)
        .map(Expr::Constraint)
        .map_err(CodecError::UnsupportedSerialized)
}

fn encode_value(value: &Value) -> Result<Json, CodecError> {
    if matches!(value, Value::Object(_)) {
        return Err(CodecError::UnrepresentableValue(to_literal(value)));
    }
    value
        .to_json()
        .ok_or_else(|| CodecError::UnrepresentableValue(to_literal(value)))
}

fn decode_value(json: &Json) -> Result<Value, CodecError> {
    if json.is_object() {
        return Err(unsupported(format!("maps are not valid values: {}", json)));
    }
    Ok(Value::from_json(json.clone()))
}

fn required<'a>(map: &'a Map<String, Json>, key: &str) -> Result<&'a Json, CodecError> {
    map.get(key)
        .ok_or_else(|| unsupported(format!("missing '{}' in {}", key, Json::Object(map.clone()))))
}

fn required_string(map: &Map<String, Json>, key: &str) -> Result<String, CodecError> {
    required(map, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unsupported(format!("'{}' must be a string", key)))
}

fn required_count(map: &Map<String, Json>) -> Result<usize, CodecError> {
    required(map, "count")?
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| unsupported("'count' must be a non-negative integer".to_string()))
}

fn unsupported(message: String) -> CodecError {
    CodecError::UnsupportedSerialized(message)
}
