use std::fmt;

use tracing::trace;

use crate::ast::{Function, Token, TokenKind};

/// Errors that can occur while turning source text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that starts no token
    UnexpectedChar { ch: char, position: usize },

    /// String literal without a closing quote
    UnterminatedString { position: usize },

    /// Unknown escape sequence inside a string literal
    InvalidEscape { ch: char, position: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::UnterminatedString { position } => write!(
                f,
                "Unterminated string starting at position {}: missing closing quote",
                position
            ),
            LexError::InvalidEscape { ch, position } => {
                write!(f, "Invalid escape sequence '\\{}' at position {}", ch, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Whitespace and commas separate tokens and are otherwise ignored
    fn skip_separators(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || ch == ',' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut seen_dot = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !seen_dot
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                seen_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        number
    }

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        self.advance();
        Token::new(kind, ch.to_string())
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_separators();

        let token = match self.current_char() {
            None => return Ok(None),
            Some('(') => self.single(TokenKind::OpenParen, '('),
            Some(')') => self.single(TokenKind::CloseParen, ')'),
            Some('{') => self.single(TokenKind::OpenBlock, '{'),
            Some('}') => self.single(TokenKind::CloseBlock, '}'),
            Some('"') => Token::string(self.read_string('"')?),
            Some('\'') => Token::string(self.read_string('\'')?),
            Some(ch) if ch.is_ascii_digit() => Token::number(self.read_number()),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Token::number(self.read_number())
            }
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let word = self.read_word();
                match word.as_str() {
                    "if" => Token::new(TokenKind::If, word),
                    "else" => Token::new(TokenKind::Else, word),
                    _ if Function::lookup(&word).is_some() => Token::function(word),
                    _ => Token::name(word),
                }
            }
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position,
                });
            }
        };

        trace!(kind = %token.kind, value = %token.value, "lexed token");
        Ok(Some(token))
    }
}

/// Tokenize a whole source string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("if else add subtract is_num width");
    assert_eq!(lexer.next_token().unwrap(), Token::symbol(TokenKind::If));
    assert_eq!(lexer.next_token().unwrap(), Token::symbol(TokenKind::Else));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::function("add")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::function("subtract")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::function("is_num")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::name("width")));
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn test_call_with_commas() {
    let tokens = tokenize(" subtract ( 5, 4 )").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::function("subtract"),
            Token::symbol(TokenKind::OpenParen).unwrap(),
            Token::number("5"),
            Token::number("4"),
            Token::symbol(TokenKind::CloseParen).unwrap(),
        ]
    );
}
