// tests/lexer_tests.rs

use fieldexpr::ast::Token;
use fieldexpr::lexer::{LexError, Lexer, is_bare_identifier};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            break;
        }
        out.push(token);
    }
    out
}

#[test]
fn test_simple_call() {
    assert_eq!(
        tokens(r#"equals("John")"#),
        vec![
            Token::Identifier("equals".to_string()),
            Token::LParen,
            Token::String("John".to_string()),
            Token::RParen,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("42 -7 3.14 -0.5 1e20 2.5E-3"),
        vec![
            Token::Integer(42),
            Token::Integer(-7),
            Token::Float(3.14),
            Token::Float(-0.5),
            Token::Float(1e20),
            Token::Float(2.5e-3),
        ]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        tokens("true false null"),
        vec![Token::Boolean(true), Token::Boolean(false), Token::Null]
    );
}

#[test]
fn test_identifiers_with_dots_and_dashes() {
    assert_eq!(
        tokens("user.address.city first-name _private"),
        vec![
            Token::Identifier("user.address.city".to_string()),
            Token::Identifier("first-name".to_string()),
            Token::Identifier("_private".to_string()),
        ]
    );
}

#[test]
fn test_delimiters() {
    assert_eq!(
        tokens("( ) [ ] ,"),
        vec![
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
            Token::Comma,
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r#""say \"hi\"\n\t\\""#),
        vec![Token::String("say \"hi\"\n\t\\".to_string())]
    );
}

#[test]
fn test_string_keeps_commas_and_parens() {
    assert_eq!(
        tokens(r#""a, b (c)""#),
        vec![Token::String("a, b (c)".to_string())]
    );
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(tokens("  key (\n a ,\t b )  "), tokens("key(a,b)"));
}

#[test]
fn test_token_start_positions() {
    let mut lexer = Lexer::new("and(  x)");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 0);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 3);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 6);
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#""abc"#);
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 0 })
    );
}

#[test]
fn test_invalid_escape() {
    let mut lexer = Lexer::new(r#""a\qb""#);
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidEscape { ch: 'q', .. })
    ));
}

#[test]
fn test_unexpected_char() {
    let mut lexer = Lexer::new("key(a) & b");
    for _ in 0..4 {
        lexer.next_token().unwrap();
    }
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar {
            ch: '&',
            position: 7
        })
    );
}

#[test]
fn test_integer_overflow_is_invalid_number() {
    let mut lexer = Lexer::new("99999999999999999999");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
}

#[test]
fn test_bare_identifiers() {
    assert!(is_bare_identifier("firstname"));
    assert!(is_bare_identifier("user.name"));
    assert!(is_bare_identifier("_x1"));

    assert!(!is_bare_identifier(""));
    assert!(!is_bare_identifier("first name"));
    assert!(!is_bare_identifier("0"));
    assert!(!is_bare_identifier("true"));
    assert!(!is_bare_identifier("null"));
    assert!(!is_bare_identifier("a\"b"));
}
