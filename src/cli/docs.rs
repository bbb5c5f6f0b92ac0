//! Grammar reference for the fieldexpr CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Logic,
    Selectors,
    Quantifiers,
    Constraints,
    Values,
    Array,
    Sql,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "logic" | "junctions" => Some(Self::Logic),
            "selectors" | "selector" | "fields" => Some(Self::Selectors),
            "quantifiers" | "quantifier" => Some(Self::Quantifiers),
            "constraints" | "constraint" => Some(Self::Constraints),
            "values" | "literals" => Some(Self::Values),
            "array" | "array_format" | "json" => Some(Self::Array),
            "sql" | "compile" => Some(Self::Sql),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"FIELDEXPR DOCUMENTATION

Filter expressions are trees of function calls. Selectors pick a field,
constraints compare it, junctions combine conditions.

  and(key(firstname, equals("John")), key(lastname, equals("Doe")))

DOCUMENTATION CATEGORIES

  logic           true(), false(), and(), or(), not()
  selectors       key, property, propertyPath, method
  quantifiers     all, atLeast, atMost, exactly, count
  constraints     equals, startsWith, in, empty, ...
  values          Strings, numbers, booleans, null, lists
  array           The nested JSON form of an expression
  sql             What compiles to SQL and how

Run 'fieldexpr doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Logic) => Ok(LOGIC_DOC),
        Some(DocCategory::Selectors) => Ok(SELECTORS_DOC),
        Some(DocCategory::Quantifiers) => Ok(QUANTIFIERS_DOC),
        Some(DocCategory::Constraints) => Ok(CONSTRAINTS_DOC),
        Some(DocCategory::Values) => Ok(VALUES_DOC),
        Some(DocCategory::Array) => Ok(ARRAY_DOC),
        Some(DocCategory::Sql) => Ok(SQL_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const LOGIC_DOC: &str = r#"LOGIC - Leaves and Junctions

  true()              Always true
  false()             Always false
  and(e1, e2, ...)    All children hold; and() is true
  or(e1, e2, ...)     Any child holds; or() is false
  not(e)              Child does not hold

Example:
  or(key(role, equals("admin")), not(key(banned, equals(true))))
"#;

const SELECTORS_DOC: &str = r#"SELECTORS - Narrowing to a Field

  key(name, e)            Object key or array index
  property(name, e)       Field, then getName/isName/hasName accessor
  propertyPath(a.b.c, e)  Dotted path, one segment at a time
  method(name, v..., e)   Result of a method call with arguments

Names are bare when they are plain identifiers, quoted otherwise:
  key(first_name, ...)    key("first name", ...)    key("0", ...)

Built-in methods on JSON values:
  length, count, upper, lower, trim, keys, values, type

Example:
  method(lower, equals("alice"))
"#;

const QUANTIFIERS_DOC: &str = r#"QUANTIFIERS - Applying to Collection Elements

  all(e)              Every element matches
  atLeast(n, e)       n or more elements match
  atMost(n, e)        n or fewer elements match
  exactly(n, e)       Exactly n elements match
  count(e)            The element count matches

Arrays range over their items, objects over their values.

Example:
  key(tags, atLeast(1, equals("urgent")))
"#;

const CONSTRAINTS_DOC: &str = r#"CONSTRAINTS - Comparing the Selected Value

  equals(v)           Loose equality (1 equals 1.0)
  notEquals(v)
  same(v)             Strict: same type and value
  notSame(v)
  greaterThan(v)      Numbers or strings
  greaterThanEqual(v)
  lessThan(v)
  lessThanEqual(v)
  startsWith("s")
  endsWith("s")
  contains("s")
  matches("regex")
  in(v1, v2, ...)
  keyExists("k")
  keyNotExists("k")
  empty()             null, false, 0, "", "0", [] or {}
  instanceOf("t")     null, boolean, integer, float, number, string, array, object

isEmpty() and isInstanceOf("t") are read as aliases.
"#;

const VALUES_DOC: &str = r#"VALUES - Literals

  "text"              Double-quoted; escapes \" \\ \n \t \r
  42  -7              Integers
  3.14  1e20          Floats (a '.' or exponent)
  true  false         Booleans (without parentheses)
  null
  [1, "a", [2]]       Lists
"#;

const ARRAY_DOC: &str = r#"ARRAY - Nested JSON Form

Every node is a map tagged by one of "logic", "selector" or "constraint".

  {"logic": "and", "conjuncts": [...]}
  {"logic": "or", "disjuncts": [...]}
  {"logic": "not", "negatedExpression": {...}}
  {"selector": "key", "key": "name", "expression": {...}}
  {"selector": "property", "propertyName": "name", "expression": {...}}
  {"selector": "propertyPath", "propertyPath": "a.b", "expression": {...}}
  {"selector": "method", "methodName": "m", "arguments": [...], "expression": {...}}
  {"selector": "atLeast", "count": 2, "expression": {...}}
  {"constraint": "equals", "value": "John"}
  {"constraint": "isEmpty"}
  {"constraint": "instanceof", "value": "string"}
  {"constraint": "null"}          same as {"constraint": "same", "value": null}
  {"constraint": "notNull"}       same as {"constraint": "notSame", "value": null}

Use --lossy-counts with 'encode' to write "count": 0 for every quantifier.
"#;

const SQL_DOC: &str = r#"SQL - Compiling Expressions

  fieldexpr compile 'key(age, greaterThan(18))' --table users --alias u
  => SELECT u FROM users u WHERE u.age > 18

Each constraint needs exactly one enclosing key/property/propertyPath.
Junction children come out last-first: or(a, b) compiles to b OR a.

  equals, same          =
  notEquals, notSame    <>
  greaterThan ...       >  >=  <  <=
  contains("x")         LIKE '%x%'
  startsWith("x")       LIKE 'x%'
  endsWith("x")         = '%x'
  in(...)               IN(...)

Not compiled: method, quantifiers, empty, keyExists, keyNotExists,
matches, instanceOf, nested field selectors.
"#;
