// tests/ast_tests.rs

use fieldexpr::ast::{Constraint, ConstraintKind, Expr};
use fieldexpr::Value;

fn greater_than_ten() -> Constraint {
    Constraint::GreaterThan(Value::Integer(10))
}

fn ends_with_css() -> Constraint {
    Constraint::EndsWith(".css".to_string())
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_selector_with_operator() {
    let expr = Expr::property_path("name", greater_than_ten());
    assert_eq!(expr.to_string(), "name>10");
}

#[test]
fn test_render_selector_with_call() {
    let expr = Expr::property_path("name", ends_with_css());
    assert_eq!(expr.to_string(), r#"name.endsWith(".css")"#);
}

#[test]
fn test_render_selector_with_junction() {
    let expr = Expr::property_path(
        "name",
        Expr::and(vec![greater_than_ten().into(), ends_with_css().into()]),
    );
    assert_eq!(expr.to_string(), r#"name{>10 && endsWith(".css")}"#);
}

#[test]
fn test_render_junctions() {
    let a = || Expr::key("a", Constraint::Equals(Value::Integer(1)));
    let b = || Expr::key("b", Constraint::NotEquals(Value::from("x")));

    assert_eq!(Expr::or(vec![a(), b()]).to_string(), r#"a==1 || b!="x""#);
    assert_eq!(
        Expr::and(vec![a(), Expr::or(vec![a(), b()])]).to_string(),
        r#"a==1 && (a==1 || b!="x")"#
    );
    assert_eq!(Expr::not(a()).to_string(), "not(a==1)");
    assert_eq!(Expr::and(vec![]).to_string(), "true");
    assert_eq!(Expr::or(vec![]).to_string(), "false");
}

#[test]
fn test_render_quantifiers_and_methods() {
    let expr = Expr::key(
        "tags",
        Expr::AtLeast {
            count: 2,
            expr: Box::new(Constraint::Same(Value::from("dev")).into()),
        },
    );
    assert_eq!(expr.to_string(), r#"tags.atLeast(2)==="dev""#);

    let expr = Expr::method("format", vec![Value::from("Y")], Constraint::IsEmpty);
    assert_eq!(expr.to_string(), r#"format("Y").empty()"#);

    let expr = Expr::key("items", Expr::Count(Box::new(greater_than_ten().into())));
    assert_eq!(expr.to_string(), "items.count>10");
}

#[test]
fn test_render_constraints() {
    let cases = [
        (Constraint::LessThanEqual(Value::Float(2.5)), "<=2.5"),
        (Constraint::NotSame(Value::Null), "!==null"),
        (
            Constraint::In(vec![Value::Integer(1), Value::from("a")]),
            r#"in(1, "a")"#,
        ),
        (Constraint::KeyExists("id".to_string()), r#"keyExists("id")"#),
        (Constraint::IsInstanceOf("string".to_string()), r#"instanceOf("string")"#),
        (Constraint::Matches("a\"b".to_string()), r#"matches("a\"b")"#),
    ];
    for (constraint, expected) in cases {
        assert_eq!(constraint.to_string(), expected);
    }
}

// ============================================================================
// Name table and node helpers
// ============================================================================

#[test]
fn test_constraint_names_are_unique_and_exact() {
    for kind in ConstraintKind::ALL {
        assert_eq!(ConstraintKind::from_name(kind.name()), Some(kind));
    }
    let mut names: Vec<&str> = ConstraintKind::ALL.iter().map(|k| k.name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), ConstraintKind::ALL.len());

    assert_eq!(ConstraintKind::from_name("equal"), None);
    assert_eq!(ConstraintKind::from_name("Equals"), None);
    assert_eq!(ConstraintKind::from_name("notSam"), None);
}

#[test]
fn test_codec_spellings() {
    assert_eq!(ConstraintKind::IsEmpty.text_name(), "empty");
    assert_eq!(ConstraintKind::IsEmpty.array_name(), "isEmpty");
    assert_eq!(ConstraintKind::IsInstanceOf.text_name(), "instanceOf");
    assert_eq!(ConstraintKind::IsInstanceOf.array_name(), "instanceof");
    assert_eq!(ConstraintKind::Equals.text_name(), "equals");

    for kind in ConstraintKind::ALL {
        for name in [kind.name(), kind.text_name(), kind.array_name()] {
            assert_eq!(ConstraintKind::from_any_name(name), Some(kind), "{}", name);
        }
    }
    assert_eq!(ConstraintKind::from_name("empty"), None);
    assert_eq!(ConstraintKind::from_any_name("null"), None);
    assert_eq!(ConstraintKind::from_any_name("instanceOF"), None);
}

#[test]
fn test_from_parts() {
    assert_eq!(
        Constraint::from_parts(ConstraintKind::Same, Some(Value::Integer(1))),
        Ok(Constraint::Same(Value::Integer(1)))
    );
    assert_eq!(
        Constraint::from_parts(ConstraintKind::IsEmpty, None),
        Ok(Constraint::IsEmpty)
    );
    assert!(Constraint::from_parts(ConstraintKind::Equals, None).is_err());
    assert!(Constraint::from_parts(ConstraintKind::Contains, Some(Value::Integer(1))).is_err());
    assert!(Constraint::from_parts(ConstraintKind::In, Some(Value::from("a"))).is_err());
}

#[test]
fn test_compared_value() {
    assert_eq!(
        Constraint::StartsWith("ab".to_string()).compared_value(),
        Some(Value::from("ab"))
    );
    assert_eq!(
        Constraint::In(vec![Value::Integer(1)]).compared_value(),
        Some(Value::Array(vec![Value::Integer(1)]))
    );
    assert_eq!(Constraint::IsEmpty.compared_value(), None);
}

#[test]
fn test_kind_and_field_names() {
    let key = Expr::key("a", Expr::Tautology);
    assert_eq!(key.kind_name(), "key");
    assert_eq!(key.field_name(), Some("a"));

    let path = Expr::property_path("a.b", Expr::Tautology);
    assert_eq!(path.field_name(), Some("a.b"));

    let method = Expr::method("m", vec![], Expr::Tautology);
    assert_eq!(method.kind_name(), "method");
    assert_eq!(method.field_name(), None);

    assert_eq!(Expr::from(Constraint::IsEmpty).kind_name(), "isEmpty");
    assert!(Expr::or(vec![]).is_junction());
    assert!(!Expr::not(Expr::Tautology).is_junction());
}

#[test]
fn test_equivalence() {
    let a = Expr::and(vec![Expr::Tautology, Expr::Contradiction]);
    let b = Expr::and(vec![Expr::Tautology, Expr::Contradiction]);
    let reordered = Expr::and(vec![Expr::Contradiction, Expr::Tautology]);
    assert!(a.equivalent_to(&b));
    assert!(!a.equivalent_to(&reordered));
    assert!(!Expr::from(Constraint::Same(Value::Integer(1)))
        .equivalent_to(&Expr::from(Constraint::NotSame(Value::Integer(1)))));
}
