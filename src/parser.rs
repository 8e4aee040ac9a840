use std::{collections::HashSet, fmt};

use tracing::{debug, trace};

use crate::ast::{Node, Program, Token, TokenKind};

/// Errors that can occur while building the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token kind that starts no expression
    UnrecognizedToken(TokenKind),

    /// Identifier that is not one of the permitted columns
    UnknownVariable(String),

    /// Positional grammar mismatch, e.g. a missing paren, block or `else`
    SyntaxError { expected: TokenKind, found: String },

    /// Token stream ended where an expression was required
    UnexpectedEnd { expected: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnrecognizedToken(kind) => write!(f, "Unrecognized token: {}", kind),
            ParseError::UnknownVariable(name) => write!(f, "Unknown variable: {}", name),
            ParseError::SyntaxError { expected, found } => {
                write!(f, "Syntax error: missing {}, found {}", expected, found)
            }
            ParseError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input: expected {}", expected)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive-descent parser over a complete token stream.
///
/// The parser owns a single forward cursor. Every production leaves the
/// cursor exactly past the tokens of its own grammar.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    columns: &'a HashSet<String>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, columns: &'a HashSet<String>) -> Self {
        Parser {
            tokens,
            position: 0,
            columns,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        match self.current() {
            Some(token) if token.kind == expected => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(ParseError::SyntaxError {
                expected,
                found: token.to_string(),
            }),
            None => Err(ParseError::SyntaxError {
                expected,
                found: "end of input".to_string(),
            }),
        }
    }

    /// Parse one expression, dispatching on the current token kind
    fn walk(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.current() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "an expression",
            });
        };
        trace!(position = self.position, token = %token, "walk");

        let kind = token.kind;
        match kind {
            TokenKind::Number => {
                let node = Node::number(token.value.clone());
                self.advance();
                Ok(node)
            }
            TokenKind::String => {
                let node = Node::string(token.value.clone());
                self.advance();
                Ok(node)
            }
            TokenKind::FunctionCall => {
                let name = token.value.clone();
                self.parse_call_expression(name)
            }
            TokenKind::If => self.parse_if_condition(),
            TokenKind::Name => {
                let name = token.value.clone();
                if self.columns.contains(&name) {
                    self.parse_column_name(name)
                } else {
                    Err(ParseError::UnknownVariable(name))
                }
            }
            _ => Err(ParseError::UnrecognizedToken(kind)),
        }
    }

    /// `name ( param* )`
    fn parse_call_expression(&mut self, name: String) -> Result<Node, ParseError> {
        self.advance(); // function name
        self.expect(TokenKind::OpenParen)?;

        let mut params = vec![];
        // Nested calls consume their own close-paren, so the first one seen
        // here belongs to this call.
        while !self.check(TokenKind::CloseParen) {
            if self.at_end() {
                return Err(ParseError::SyntaxError {
                    expected: TokenKind::CloseParen,
                    found: "end of input".to_string(),
                });
            }
            params.push(self.walk()?);
        }
        self.advance(); // ')'

        trace!(%name, params = params.len(), "parsed call expression");
        Ok(Node::CallExpression { name, params })
    }

    /// `if ( cond ) { a } else { b }`
    fn parse_if_condition(&mut self) -> Result<Node, ParseError> {
        self.advance(); // 'if'

        self.expect(TokenKind::OpenParen)?;
        let condition = self.walk()?;
        self.expect(TokenKind::CloseParen)?;

        self.expect(TokenKind::OpenBlock)?;
        let true_body = self.walk()?;
        self.expect(TokenKind::CloseBlock)?;

        self.expect(TokenKind::Else)?;

        self.expect(TokenKind::OpenBlock)?;
        let false_body = self.walk()?;
        self.expect(TokenKind::CloseBlock)?;

        Ok(Node::if_condition(condition, true_body, false_body))
    }

    /// Column reference. Consumes its own token, so like every other
    /// production it leaves the cursor just past what it parsed.
    fn parse_column_name(&mut self, name: String) -> Result<Node, ParseError> {
        self.advance();
        Ok(Node::ColumnName { name })
    }

    /// Parse the whole token stream into a program.
    ///
    /// Top-level expressions may follow each other without separators.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = vec![];
        while !self.at_end() {
            body.push(self.walk()?);
        }
        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }
}

/// Parse a token stream into a [`Program`].
///
/// Identifiers are accepted only when they appear in `columns`.
///
/// # Examples
///
/// ```
/// use colexpr::{lexer::tokenize, parse, Node};
/// use std::collections::HashSet;
///
/// let tokens = tokenize("add(2, 3)").unwrap();
/// let program = parse(tokens, &HashSet::new()).unwrap();
///
/// assert_eq!(
///     program.body,
///     vec![Node::call("add", vec![Node::number("2"), Node::number("3")])]
/// );
/// ```
pub fn parse(tokens: Vec<Token>, columns: &HashSet<String>) -> Result<Program, ParseError> {
    Parser::new(tokens, columns).parse_program()
}
