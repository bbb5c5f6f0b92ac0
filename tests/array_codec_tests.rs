// tests/array_codec_tests.rs

use fieldexpr::ast::{Constraint, ConstraintKind, Expr};
use fieldexpr::parser::MAX_NESTING_DEPTH;
use fieldexpr::{ArrayCodec, CodecError, CodecOptions, Value};
use serde_json::json;

fn encode(expr: &Expr) -> serde_json::Value {
    ArrayCodec::new().encode(expr).unwrap()
}

fn decode(json: serde_json::Value) -> Result<Expr, CodecError> {
    ArrayCodec::new().decode(&json)
}

fn john() -> Expr {
    Expr::key("firstname", Constraint::Equals(Value::from("John")))
}

// ============================================================================
// Encoded shapes
// ============================================================================

#[test]
fn test_encode_logic() {
    assert_eq!(encode(&Expr::Tautology), json!({"logic": "true"}));
    assert_eq!(encode(&Expr::Contradiction), json!({"logic": "false"}));
    assert_eq!(
        encode(&Expr::and(vec![Expr::Tautology])),
        json!({"logic": "and", "conjuncts": [{"logic": "true"}]})
    );
    assert_eq!(
        encode(&Expr::or(vec![])),
        json!({"logic": "or", "disjuncts": []})
    );
    assert_eq!(
        encode(&Expr::not(Expr::Contradiction)),
        json!({"logic": "not", "negatedExpression": {"logic": "false"}})
    );
}

#[test]
fn test_encode_field_selectors() {
    assert_eq!(
        encode(&john()),
        json!({
            "selector": "key",
            "key": "firstname",
            "expression": {"constraint": "equals", "value": "John"}
        })
    );
    assert_eq!(
        encode(&Expr::property("size", Constraint::LessThan(Value::Float(2.5)))),
        json!({
            "selector": "property",
            "propertyName": "size",
            "expression": {"constraint": "lessThan", "value": 2.5}
        })
    );
    assert_eq!(
        encode(&Expr::property_path("a.b", Constraint::IsEmpty)),
        json!({
            "selector": "propertyPath",
            "propertyPath": "a.b",
            "expression": {"constraint": "isEmpty"}
        })
    );
}

#[test]
fn test_encode_method_selector() {
    let expr = Expr::method(
        "format",
        vec![Value::from("Y"), Value::Null],
        Constraint::Equals(Value::from("2020")),
    );
    assert_eq!(
        encode(&expr),
        json!({
            "selector": "method",
            "methodName": "format",
            "arguments": ["Y", null],
            "expression": {"constraint": "equals", "value": "2020"}
        })
    );
}

#[test]
fn test_encode_in_constraint_as_list() {
    let expr = Expr::from(Constraint::In(vec![Value::Integer(1), Value::from("a")]));
    assert_eq!(encode(&expr), json!({"constraint": "in", "value": [1, "a"]}));
}

#[test]
fn test_encode_every_constraint_name() {
    for kind in ConstraintKind::ALL {
        let value = match kind {
            ConstraintKind::IsEmpty => None,
            ConstraintKind::In => Some(Value::Array(vec![])),
            _ => Some(Value::from("v")),
        };
        let constraint = Constraint::from_parts(kind, value).unwrap();
        let encoded = encode(&constraint.into());
        assert_eq!(encoded["constraint"], kind.array_name());
        assert_eq!(encoded.get("value").is_some(), kind.takes_value());
    }
}

#[test]
fn test_encode_quantifier_counts() {
    let expr = Expr::AtLeast {
        count: 3,
        expr: Box::new(Expr::Tautology),
    };
    assert_eq!(
        encode(&expr),
        json!({"selector": "atLeast", "count": 3, "expression": {"logic": "true"}})
    );
    assert_eq!(
        encode(&Expr::All(Box::new(Expr::Tautology))),
        json!({"selector": "all", "count": 0, "expression": {"logic": "true"}})
    );
}

#[test]
fn test_encode_lossy_quantifier_counts() {
    let codec = ArrayCodec::with_options(CodecOptions {
        lossy_quantifier_counts: true,
    });
    let expr = Expr::Exactly {
        count: 5,
        expr: Box::new(Expr::Tautology),
    };

    let encoded = codec.encode(&expr).unwrap();
    assert_eq!(encoded["count"], 0);

    // the count is gone for good
    assert_eq!(
        codec.decode(&encoded).unwrap(),
        Expr::Exactly {
            count: 0,
            expr: Box::new(Expr::Tautology)
        }
    );
}

#[test]
fn test_encode_unrepresentable_values() {
    let nan = Expr::from(Constraint::GreaterThan(Value::Float(f64::INFINITY)));
    assert!(matches!(
        ArrayCodec::new().encode(&nan),
        Err(CodecError::UnrepresentableValue(_))
    ));

    let object_arg = Expr::method("m", vec![Value::Object(Default::default())], Expr::Tautology);
    assert!(matches!(
        ArrayCodec::new().encode(&object_arg),
        Err(CodecError::UnrepresentableValue(_))
    ));
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_conjunction() {
    let json = json!({
        "logic": "and",
        "conjuncts": [
            {"selector": "key", "key": "firstname", "expression": {"constraint": "equals", "value": "John"}},
            {"logic": "not", "negatedExpression": {"constraint": "isEmpty"}}
        ]
    });
    assert_eq!(
        decode(json).unwrap(),
        Expr::and(vec![john(), Expr::not(Constraint::IsEmpty)])
    );
}

#[test]
fn test_decode_numbers_keep_their_type() {
    assert_eq!(
        decode(json!({"constraint": "equals", "value": 1})).unwrap(),
        Expr::from(Constraint::Equals(Value::Integer(1)))
    );
    assert_eq!(
        decode(json!({"constraint": "equals", "value": 1.0})).unwrap(),
        Expr::from(Constraint::Equals(Value::Float(1.0)))
    );
}

#[test]
fn test_decode_is_empty_with_null_value() {
    assert_eq!(
        decode(json!({"constraint": "isEmpty", "value": null})).unwrap(),
        Expr::from(Constraint::IsEmpty)
    );
}

#[test]
fn test_encode_instance_of_tag() {
    let expr = Expr::key("name", Constraint::IsInstanceOf("string".to_string()));
    assert_eq!(
        encode(&expr),
        json!({
            "selector": "key",
            "key": "name",
            "expression": {"constraint": "instanceof", "value": "string"}
        })
    );
}

#[test]
fn test_decode_null_shorthands() {
    assert_eq!(
        decode(json!({"selector": "key", "key": "username", "expression": {"constraint": "null"}})).unwrap(),
        Expr::key("username", Constraint::Same(Value::Null))
    );
    assert_eq!(
        decode(json!({"selector": "key", "key": "username", "expression": {"constraint": "notNull"}})).unwrap(),
        Expr::key("username", Constraint::NotSame(Value::Null))
    );
}

#[test]
fn test_decode_instance_of_spellings() {
    for name in ["instanceof", "isInstanceOf", "instanceOf"] {
        assert_eq!(
            decode(json!({"constraint": name, "value": "string"})).unwrap(),
            Expr::from(Constraint::IsInstanceOf("string".to_string())),
            "{}",
            name
        );
    }
    assert_eq!(
        decode(json!({"constraint": "empty"})).unwrap(),
        Expr::from(Constraint::IsEmpty)
    );
}

#[test]
fn test_decode_unknown_discriminators() {
    for json in [
        json!({"logic": "xor"}),
        json!({"selector": "index", "expression": {"logic": "true"}}),
        json!({"constraint": "equal", "value": 1}),
        json!({"constraint": "Null"}),
        json!({"something": "else"}),
        json!("and"),
        json!([]),
    ] {
        let err = decode(json.clone()).unwrap_err();
        assert!(err.is_unsupported_serialized(), "{}", json);
    }
}

#[test]
fn test_decode_missing_keys() {
    let cases = [
        json!({"logic": "and"}),
        json!({"logic": "not"}),
        json!({"selector": "key", "expression": {"logic": "true"}}),
        json!({"selector": "key", "key": "a"}),
        json!({"selector": "method", "methodName": "m", "expression": {"logic": "true"}}),
        json!({"selector": "atLeast", "expression": {"logic": "true"}}),
        json!({"constraint": "equals"}),
    ];
    for json in cases {
        assert!(
            matches!(decode(json.clone()), Err(CodecError::UnsupportedSerialized(_))),
            "{}",
            json
        );
    }
}

#[test]
fn test_decode_wrong_types() {
    let cases = [
        json!({"logic": "and", "conjuncts": {"logic": "true"}}),
        json!({"selector": "key", "key": 1, "expression": {"logic": "true"}}),
        json!({"selector": "atMost", "count": -1, "expression": {"logic": "true"}}),
        json!({"selector": "atMost", "count": "2", "expression": {"logic": "true"}}),
        json!({"constraint": "startsWith", "value": 1}),
        json!({"constraint": "in", "value": "a"}),
        json!({"constraint": "equals", "value": {"nested": true}}),
        json!({"constraint": "isEmpty", "value": 1}),
    ];
    for json in cases {
        assert!(
            matches!(decode(json.clone()), Err(CodecError::UnsupportedSerialized(_))),
            "{}",
            json
        );
    }
}

#[test]
fn test_decode_depth_limit() {
    let mut json = json!({"logic": "true"});
    for _ in 0..MAX_NESTING_DEPTH {
        json = json!({"logic": "not", "negatedExpression": json});
    }
    assert!(matches!(
        decode(json),
        Err(CodecError::UnsupportedSerialized(_))
    ));
}

#[test]
fn test_round_trip_nested_tree() {
    let expr = Expr::or(vec![
        Expr::and(vec![]),
        Expr::not(john()),
        Expr::property_path(
            "user.tags",
            Expr::AtMost {
                count: 2,
                expr: Box::new(Constraint::Matches("^a+$".to_string()).into()),
            },
        ),
        Expr::key("n", Expr::Count(Box::new(Constraint::NotSame(Value::Integer(0)).into()))),
        Expr::key("meta", Constraint::KeyExists("id".to_string())),
    ]);

    let codec = ArrayCodec::new();
    let encoded = codec.encode(&expr).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), expr);
}
