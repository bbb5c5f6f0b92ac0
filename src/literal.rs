//! Literal printing for values embedded in expressions.
//!
//! Both the default rendering of a tree (`Display`) and the text codec write
//! compared values and method arguments through this printer, so a string
//! always comes out quoted and escaped the same way the lexer reads it back.
//!
//! # Features
//!
//! - **String escaping** - `"`, `\`, newline, tab and carriage return
//! - **Type preservation** - floats always carry a `.` or an exponent
//! - **Deterministic** - object keys are sorted alphabetically
//!
//! # Examples
//!
//! ```
//! use fieldexpr::Value;
//! use fieldexpr::literal::to_literal;
//!
//! assert_eq!(to_literal(&Value::Integer(42)), "42");
//! assert_eq!(to_literal(&Value::Float(1.0)), "1.0");
//! assert_eq!(to_literal(&Value::from("a\"b")), "\"a\\\"b\"");
//! ```

use std::collections::HashMap;

use crate::value::Value;

pub struct LiteralPrinter;

impl LiteralPrinter {
    pub fn print(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            // Debug keeps the fractional part (`1.0`, not `1`)
            Value::Float(n) => format!("{:?}", n),
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::Array(arr) => self.print_array(arr),
            Value::Object(obj) => self.print_object(obj),
        }
    }

    fn print_array(&self, arr: &[Value]) -> String {
        let items: Vec<String> = arr.iter().map(|v| self.print(v)).collect();
        format!("[{}]", items.join(", "))
    }

    fn print_object(&self, obj: &HashMap<String, Value>) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        // Sort keys for deterministic output
        let mut entries: Vec<_> = obj.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let items: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("\"{}\": {}", self.escape_string(k), self.print(v)))
            .collect();
        format!("{{{}}}", items.join(", "))
    }

    pub fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c => vec![c],
            })
            .collect()
    }
}

/// Renders a value as it appears inside an expression.
pub fn to_literal(value: &Value) -> String {
    LiteralPrinter.print(value)
}

/// Quotes and escapes a string.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", LiteralPrinter.escape_string(s))
}

/// Whether the value can be written in the text grammar and read back
/// unchanged: no objects, no NaN or infinite floats.
pub fn is_representable(value: &Value) -> bool {
    match value {
        Value::Float(n) => n.is_finite(),
        Value::Array(items) => items.iter().all(is_representable),
        Value::Object(_) => false,
        _ => true,
    }
}
