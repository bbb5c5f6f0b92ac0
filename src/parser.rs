use std::mem;

use thiserror::Error;

use crate::{
    ast::{Constraint, ConstraintKind, Expr, Token},
    lexer::{LexError, Lexer, Position},
    value::Value,
};

/// Nesting limit for function calls and list values in one expression.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("unknown expression '{name}' at position {position}")]
    UnknownFunction { name: String, position: Position },

    #[error("invalid arguments for '{function}' at position {position}: {message}")]
    InvalidArguments {
        function: String,
        message: String,
        position: Position,
    },

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Argument that is either a plain value or the trailing sub-expression of a
/// `method(...)` call.
enum Argument {
    Value(Value),
    Expr(Expr),
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_start: Position,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_start = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_start,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_start = self.lexer.token_start();
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.describe()));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token.describe(),
            position: self.current_start,
        }
    }

    /// Parses a complete expression; trailing input is an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(expr)
    }

    /// Parses one `name(arguments)` call.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep(MAX_NESTING_DEPTH));
        }

        let position = self.current_start;
        let name = match &self.current_token {
            Token::Identifier(name) => name.clone(),
            Token::Boolean(true) => "true".to_string(),
            Token::Boolean(false) => "false".to_string(),
            _ => return Err(self.unexpected("expression")),
        };
        self.advance()?;
        self.expect(Token::LParen)?;

        self.depth += 1;
        let expr = self.parse_call(&name, position);
        self.depth -= 1;
        let expr = expr?;

        self.expect(Token::RParen)?;
        Ok(expr)
    }

    /// Dispatches on the exact function name. The opening parenthesis has
    /// been consumed; the closing one is left for the caller.
    fn parse_call(&mut self, name: &str, position: Position) -> Result<Expr, ParseError> {
        match name {
            "true" => Ok(Expr::Tautology),
            "false" => Ok(Expr::Contradiction),
            "and" => Ok(Expr::Conjunction(self.parse_expression_list()?)),
            "or" => Ok(Expr::Disjunction(self.parse_expression_list()?)),
            "not" => Ok(Expr::Negation(Box::new(self.parse_expression()?))),

            "key" | "property" | "propertyPath" => {
                let field = self.parse_name()?;
                self.expect(Token::Comma)?;
                let expr = Box::new(self.parse_expression()?);
                Ok(match name {
                    "key" => Expr::Key { key: field, expr },
                    "property" => Expr::Property { name: field, expr },
                    _ => Expr::PropertyPath { path: field, expr },
                })
            }
            "method" => self.parse_method(),

            "all" => Ok(Expr::All(Box::new(self.parse_expression()?))),
            "count" => Ok(Expr::Count(Box::new(self.parse_expression()?))),
            "atLeast" | "atMost" | "exactly" => {
                let count = self.parse_count()?;
                self.expect(Token::Comma)?;
                let expr = Box::new(self.parse_expression()?);
                Ok(match name {
                    "atLeast" => Expr::AtLeast { count, expr },
                    "atMost" => Expr::AtMost { count, expr },
                    _ => Expr::Exactly { count, expr },
                })
            }

            _ => match ConstraintKind::from_any_name(name) {
                Some(kind) => self.parse_constraint(kind, position).map(Expr::Constraint),
                None => Err(ParseError::UnknownFunction {
                    name: name.to_string(),
                    position,
                }),
            },
        }
    }

    /// Comma-separated sub-expressions, possibly none.
    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut children = vec![];

        while !self.check(&Token::RParen) {
            children.push(self.parse_expression()?);

            if !self.check(&Token::RParen) {
                self.expect(Token::Comma)?;
            }
        }
        Ok(children)
    }

    /// `method(name, value..., expr)`: every argument up to the first
    /// expression is a method argument.
    fn parse_method(&mut self) -> Result<Expr, ParseError> {
        let name = self.parse_name()?;
        let mut args = vec![];

        loop {
            self.expect(Token::Comma)?;
            match self.parse_argument()? {
                Argument::Value(value) => args.push(value),
                Argument::Expr(expr) => {
                    return Ok(Expr::Method {
                        name,
                        args,
                        expr: Box::new(expr),
                    });
                }
            }
        }
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        match self.current_token {
            Token::Identifier(_) => Ok(Argument::Expr(self.parse_expression()?)),
            // `true` is a value, `true()` is the logic leaf
            Token::Boolean(b) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.advance()?;
                    self.expect(Token::RParen)?;
                    Ok(Argument::Expr(if b {
                        Expr::Tautology
                    } else {
                        Expr::Contradiction
                    }))
                } else {
                    Ok(Argument::Value(Value::Boolean(b)))
                }
            }
            _ => Ok(Argument::Value(self.parse_value()?)),
        }
    }

    fn parse_constraint(&mut self, kind: ConstraintKind, position: Position) -> Result<Constraint, ParseError> {
        let mut values = vec![];
        while !self.check(&Token::RParen) {
            values.push(self.parse_value()?);

            if !self.check(&Token::RParen) {
                self.expect(Token::Comma)?;
            }
        }

        let invalid = |message: String| ParseError::InvalidArguments {
            function: kind.text_name().to_string(),
            message,
            position,
        };

        let value = match kind {
            ConstraintKind::In => Some(Value::Array(values)),
            ConstraintKind::IsEmpty if values.is_empty() => None,
            ConstraintKind::IsEmpty => return Err(invalid("takes no arguments".to_string())),
            _ if values.len() == 1 => values.pop(),
            _ => {
                return Err(invalid(format!(
                    "expects exactly one argument, got {}",
                    values.len()
                )));
            }
        };

        Constraint::from_parts(kind, value).map_err(invalid)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => Value::String(s),
            Token::Integer(n) => Value::Integer(n),
            Token::Float(n) => Value::Float(n),
            Token::Boolean(b) => Value::Boolean(b),
            Token::Null => Value::Null,
            Token::LBracket => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::TooDeep(MAX_NESTING_DEPTH));
                }
                self.advance()?;
                self.depth += 1;
                let items = self.parse_list_items();
                self.depth -= 1;
                // leaves `]` as the current token, consumed below
                Value::Array(items?)
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("value"));
            }
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_list_items(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut items = vec![];
        while !self.check(&Token::RBracket) {
            items.push(self.parse_value()?);

            if !self.check(&Token::RBracket) {
                self.expect(Token::Comma)?;
            }
        }
        Ok(items)
    }

    /// Field or method name: bare identifier, quoted string, or integer key.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        let name = match &self.current_token {
            Token::Identifier(name) | Token::String(name) => name.clone(),
            Token::Integer(n) => n.to_string(),
            _ => return Err(self.unexpected("name")),
        };
        self.advance()?;
        Ok(name)
    }

    fn parse_count(&mut self) -> Result<usize, ParseError> {
        let count = match self.current_token {
            Token::Integer(n) if n >= 0 => n as usize,
            _ => return Err(self.unexpected("non-negative integer count")),
        };
        self.advance()?;
        Ok(count)
    }
}
