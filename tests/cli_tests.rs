// tests/cli_tests.rs

use fieldexpr::CodecOptions;
use fieldexpr::cli::{
    CheckOptions, CheckResult, CliError, DocCategory, compile_to_sql, decode_array, encode_text,
    execute_check, get_doc_category, get_docs_overview, parse_any,
};
use serde_json::json;

const JOHN_DOE: &str = r#"and(key(firstname, equals("John")), key(lastname, equals("Doe")))"#;

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        expression: JOHN_DOE.to_string(),
        input: None,
        syntax_only: true,
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::SyntaxValid);
}

#[test]
fn test_check_reports_parse_errors() {
    let options = CheckOptions {
        expression: "and(key(a, equalz(1)))".to_string(),
        input: None,
        syntax_only: true,
    };
    let err = execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Codec(_)));
    assert!(err.to_string().contains("equalz"));
}

#[test]
fn test_eval_against_json() {
    let options = CheckOptions {
        expression: JOHN_DOE.to_string(),
        input: Some(r#"{"firstname": "John", "lastname": "Doe"}"#.to_string()),
        syntax_only: false,
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::Evaluated(true));

    let options = CheckOptions {
        input: Some(r#"{"firstname": "Jane", "lastname": "Doe"}"#.to_string()),
        ..options
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::Evaluated(false));
}

#[test]
fn test_eval_without_input() {
    let options = CheckOptions {
        expression: "true()".to_string(),
        input: None,
        syntax_only: false,
    };
    assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
}

#[test]
fn test_eval_with_invalid_json() {
    let options = CheckOptions {
        expression: "true()".to_string(),
        input: Some("{not json".to_string()),
        syntax_only: false,
    };
    assert!(matches!(execute_check(&options), Err(CliError::Json(_))));
}

#[test]
fn test_encode_text() {
    let encoded = encode_text(r#"key(tags, atLeast(2, equals("a")))"#, CodecOptions::default()).unwrap();
    assert_eq!(
        encoded,
        json!({
            "selector": "key",
            "key": "tags",
            "expression": {
                "selector": "atLeast",
                "count": 2,
                "expression": {"constraint": "equals", "value": "a"}
            }
        })
    );

    let lossy = encode_text(
        r#"key(tags, atLeast(2, equals("a")))"#,
        CodecOptions {
            lossy_quantifier_counts: true,
        },
    )
    .unwrap();
    assert_eq!(lossy["expression"]["count"], 0);
}

#[test]
fn test_decode_array() {
    let json = r#"{"logic": "and", "conjuncts": [
        {"selector": "key", "key": "firstname", "expression": {"constraint": "equals", "value": "John"}},
        {"selector": "key", "key": "lastname", "expression": {"constraint": "equals", "value": "Doe"}}
    ]}"#;
    assert_eq!(decode_array(json).unwrap(), JOHN_DOE);
}

#[test]
fn test_decode_array_errors() {
    assert!(matches!(decode_array("[1, 2"), Err(CliError::Json(_))));
    assert!(matches!(
        decode_array(r#"{"logic": "nand"}"#),
        Err(CliError::Codec(_))
    ));
}

#[test]
fn test_parse_any_accepts_both_forms() {
    let from_text = parse_any(JOHN_DOE).unwrap();
    let from_array = parse_any(r#"  {"logic": "and", "conjuncts": [
        {"selector": "key", "key": "firstname", "expression": {"constraint": "equals", "value": "John"}},
        {"selector": "key", "key": "lastname", "expression": {"constraint": "equals", "value": "Doe"}}
    ]}"#)
    .unwrap();
    assert_eq!(from_text, from_array);
}

#[test]
fn test_compile_to_sql() {
    assert_eq!(
        compile_to_sql(r#"or(key(channel, equals("element")), key(channel, equals("user")))"#, "messages", "m")
            .unwrap(),
        "SELECT m FROM messages m WHERE m.channel = 'user' OR m.channel = 'element'"
    );

    let err = compile_to_sql(r#"equals("x")"#, "messages", "m").unwrap_err();
    assert!(matches!(err, CliError::Compile(_)));
}

#[test]
fn test_docs() {
    let overview = get_docs_overview();
    for category in ["logic", "selectors", "quantifiers", "constraints", "values", "array", "sql"] {
        assert!(overview.contains(category));
        assert!(DocCategory::from_name(category).is_some());
        assert!(!get_doc_category(category).unwrap().is_empty());
    }

    assert_eq!(DocCategory::from_name("Array-Format"), Some(DocCategory::Array));
    assert!(matches!(
        get_doc_category("nope"),
        Err(CliError::UnknownCategory(ref name)) if name == "nope"
    ));
}
