pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Function, Node, Program, Token, TokenKind};
pub use evaluator::{EvalError, Evaluator, evaluate};
pub use lexer::{LexError, Lexer, tokenize};
pub use parser::{ParseError, Parser, parse};
pub use value::{NumberError, Value};
