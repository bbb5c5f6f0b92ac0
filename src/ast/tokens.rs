/// Lexical tokens of the text grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating point number, recognized by a `.` or an exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -1.0
    /// 1e20
    /// ```
    Float(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "say \"hi\""
    /// ```
    String(String),

    /// `true` / `false`. Followed by `()` they are the logic leaves,
    /// otherwise boolean values.
    Boolean(bool),

    /// Null value
    Null,

    /// Function name or bare field name
    ///
    /// Starts with a letter or underscore, followed by letters, digits,
    /// underscores, dots or dashes.
    ///
    /// # Examples
    /// ```text
    /// startsWith
    /// firstname
    /// user.address.city
    /// ```
    Identifier(String),

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Float(n) => format!("float {:?}", n),
            Token::Integer(n) => format!("integer {}", n),
            Token::String(s) => format!("string {:?}", s),
            Token::Boolean(b) => b.to_string(),
            Token::Null => "null".to_string(),
            Token::Identifier(name) => format!("'{}'", name),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
