//! Reading named fields out of host values.
//!
//! Selectors narrow the value in scope by name. How a name is resolved depends
//! on the host: documents answer by key, application types by public field or
//! by a zero-argument accessor named after the field (`getName`, `isActive`,
//! `hasChildren`). [`PropertyAccess`] is that seam.

use crate::value::{Value, type_name};

/// A host whose fields selectors can read.
///
/// Only [`field`](PropertyAccess::field) is required. Types with accessor
/// methods override [`accessor`](PropertyAccess::accessor); types that should
/// also be compared directly by constraints return themselves from
/// [`as_value`](PropertyAccess::as_value).
///
/// # Examples
///
/// ```
/// use fieldexpr::{PropertyAccess, Value};
///
/// struct Stylesheet {
///     pub name: String,
///     size: i64,
/// }
///
/// impl PropertyAccess for Stylesheet {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
///
///     fn accessor(&self, method: &str) -> Option<Value> {
///         match method {
///             "getSize" => Some(Value::Integer(self.size)),
///             _ => None,
///         }
///     }
/// }
///
/// let sheet = Stylesheet { name: "main.css".into(), size: 10 };
/// assert_eq!(sheet.read_property("size"), Some(Value::Integer(10)));
/// assert!(!sheet.is_readable("color"));
/// ```
pub trait PropertyAccess {
    /// Key lookup or public field access.
    fn field(&self, name: &str) -> Option<Value>;

    /// Zero-argument accessor, looked up by its full method name.
    fn accessor(&self, _method: &str) -> Option<Value> {
        None
    }

    /// Parametrized method call used by method selectors.
    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        if args.is_empty() {
            self.accessor(name)
        } else {
            None
        }
    }

    /// The host itself as a value, when constraints may compare it directly.
    fn as_value(&self) -> Option<&Value> {
        None
    }

    /// Reads a property: field first, then `get<Name>`, `is<Name>`,
    /// `has<Name>` accessors.
    fn read_property(&self, name: &str) -> Option<Value> {
        self.field(name)
            .or_else(|| accessor_names(name).find_map(|method| self.accessor(&method)))
    }

    fn is_readable(&self, name: &str) -> bool {
        self.read_property(name).is_some()
    }
}

/// Accessor method names tried for a property, in order.
pub fn accessor_names(name: &str) -> impl Iterator<Item = String> + '_ {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    ["get", "is", "has"]
        .into_iter()
        .map(move |prefix| format!("{}{}", prefix, capitalized))
}

/// Reads a dotted property path. The first segment is resolved against the
/// host, the rest descend through the values read.
pub fn read_path<H: PropertyAccess + ?Sized>(host: &H, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = host.read_property(first)?;
    for segment in segments {
        current = current.read_property(segment)?;
    }
    Some(current)
}

impl PropertyAccess for Value {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.get(name).cloned(),
            Value::Array(arr) => name.parse::<usize>().ok().and_then(|i| arr.get(i).cloned()),
            _ => None,
        }
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        if !args.is_empty() {
            return None;
        }

        match (name, self) {
            ("length" | "count", Value::Array(arr)) => Some(Value::Integer(arr.len() as i64)),
            ("length" | "count", Value::Object(obj)) => Some(Value::Integer(obj.len() as i64)),
            ("length", Value::String(s)) => Some(Value::Integer(s.chars().count() as i64)),
            ("upper", Value::String(s)) => Some(Value::String(s.to_uppercase())),
            ("lower", Value::String(s)) => Some(Value::String(s.to_lowercase())),
            ("trim", Value::String(s)) => Some(Value::String(s.trim().to_string())),
            ("keys", Value::Object(obj)) => {
                let mut keys: Vec<&String> = obj.keys().collect();
                keys.sort();
                Some(Value::Array(
                    keys.into_iter().map(|k| Value::String(k.clone())).collect(),
                ))
            }
            ("values", Value::Object(obj)) => {
                let mut entries: Vec<_> = obj.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                Some(Value::Array(entries.into_iter().map(|(_, v)| v.clone()).collect()))
            }
            ("type", v) => Some(Value::String(type_name(v).to_string())),
            _ => None,
        }
    }

    fn as_value(&self) -> Option<&Value> {
        Some(self)
    }
}
