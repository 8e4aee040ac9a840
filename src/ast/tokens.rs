use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal, lexeme kept verbatim
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// -1
    /// ```
    Number,

    /// String literal enclosed in double or single quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'abc'
    /// ```
    String,

    /// Identifier that is neither a keyword nor a built-in function.
    ///
    /// Only valid when it names a permitted column.
    Name,

    /// Name of a built-in function (`add`, `subtract`, `is_num`)
    FunctionCall,

    /// `if` keyword
    If,

    /// `else` keyword
    Else,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `{`
    OpenBlock,

    /// `}`
    CloseBlock,
}

impl TokenKind {
    /// Short human-readable description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Name => "name",
            TokenKind::FunctionCall => "function",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenBlock => "'{'",
            TokenKind::CloseBlock => "'}'",
        }
    }

    /// The fixed source text of a keyword or punctuation kind.
    ///
    /// `None` for kinds whose text varies (literals, names, functions).
    pub fn lexeme(&self) -> Option<&'static str> {
        match self {
            TokenKind::If => Some("if"),
            TokenKind::Else => Some("else"),
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenBlock => Some("{"),
            TokenKind::CloseBlock => Some("}"),
            TokenKind::Number | TokenKind::String | TokenKind::Name | TokenKind::FunctionCall => {
                None
            }
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token: its kind plus the literal text it stands for.
///
/// For string literals `value` is the unescaped content without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Token::new(TokenKind::Number, value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Token::new(TokenKind::String, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Token::new(TokenKind::Name, value)
    }

    pub fn function(value: impl Into<String>) -> Self {
        Token::new(TokenKind::FunctionCall, value)
    }

    /// Build a punctuation or keyword token from its canonical lexeme.
    ///
    /// `None` for kinds that carry their own text; use the dedicated
    /// constructors for those.
    pub fn symbol(kind: TokenKind) -> Option<Self> {
        kind.lexeme().map(|value| Token::new(kind, value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Name | TokenKind::FunctionCall => {
                write!(f, "{} '{}'", self.kind, self.value)
            }
            TokenKind::String => write!(f, "string \"{}\"", self.value),
            _ => write!(f, "{}", self.kind),
        }
    }
}

#[test]
fn test_symbol_only_for_fixed_lexemes() {
    assert_eq!(
        Token::symbol(TokenKind::OpenBlock),
        Some(Token::new(TokenKind::OpenBlock, "{"))
    );
    assert_eq!(
        Token::symbol(TokenKind::Else).map(|t| t.value),
        Some("else".to_string())
    );
    assert_eq!(Token::symbol(TokenKind::Number), None);
    assert_eq!(Token::symbol(TokenKind::String), None);
    assert_eq!(Token::symbol(TokenKind::Name), None);
    assert_eq!(Token::symbol(TokenKind::FunctionCall), None);
}
