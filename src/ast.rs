//! # Column Expression Language - Abstract Syntax Tree
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Tokens produced by the lexer and consumed by the parser
//! - **[nodes]** - Expression nodes and the [`Program`] root
//! - **[functions]** - The fixed vocabulary of built-in functions
//!
//! ## Quick Start
//!
//! ```text
//! if (is_num(sepallength)) { add(sepallength, 1) } else { 0 }
//! ```
//!
//! ## Core Concepts
//!
//! ### Programs
//!
//! A program is a flat list of top-level expressions. Each one evaluates to
//! exactly one value, so `add(1, 1) subtract(3, 1)` yields `[2, 2]`.
//!
//! ### Columns
//!
//! Bare identifiers are column references. The caller supplies the set of
//! permitted column names up front; anything else is rejected while parsing.
//!
//! ### Conditionals
//!
//! `if (cond) { a } else { b }` always has both branches, and each slot holds
//! exactly one expression.
pub mod functions;
pub mod nodes;
pub mod tokens;

pub use functions::Function;
pub use nodes::{Node, Program};
pub use tokens::{Token, TokenKind};
