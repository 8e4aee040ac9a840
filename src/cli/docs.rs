//! Documentation content for colexpr CLI

use super::CliError;
use crate::Function;

/// Get the docs overview (function listing)
pub fn get_docs_overview() -> &'static str {
    r#"COLEXPR DOCUMENTATION

colexpr evaluates small programs made of built-in function calls, literals,
column names and if/else conditionals. Each top-level expression produces one
result.

FUNCTIONS

  add           Sum of all parameters
  subtract      First parameter minus each of the others
  is_num        Whether every parameter is numeric

SYNTAX

  42  -1.5          Number literals
  "text"  'text'    String literals
  name              Column reference (must be listed with --columns)
  f(a, b)           Function call, commas optional
  if (c) { a } else { b }
                    Conditional; c is truthy when it is a non-zero number,
                    a non-empty string or true

Run 'colexpr docs <function>' for details on one function.
"#
}

/// Get documentation for a specific function
pub fn get_function_doc(name: &str) -> Result<&'static str, CliError> {
    match Function::lookup(name.trim()) {
        Some(Function::Add) => Ok(ADD_DOC),
        Some(Function::Subtract) => Ok(SUBTRACT_DOC),
        Some(Function::IsNum) => Ok(IS_NUM_DOC),
        None => Err(CliError::UnknownFunction(name.to_string())),
    }
}

const ADD_DOC: &str = r#"add(a, b, ...)

  Sums every parameter, starting from 0, left to right.

  Example:
    add(2, 3)                 => 5
    add(2, subtract(4, 2))    => 4
    add("1.5", 1)             => 2.5

  Constraints:
    - At least one parameter is required
    - Every parameter must be a number or a numeric string
"#;

const SUBTRACT_DOC: &str = r#"subtract(a, b, ...)

  Starts from the first parameter and subtracts each following one.

  Example:
    subtract(5, 4)            => 1
    subtract(10, 3, 2)        => 5
    subtract(7)               => 7

  Constraints:
    - At least one parameter is required
    - Every parameter must be a number or a numeric string
"#;

const IS_NUM_DOC: &str = r#"is_num(a, ...)

  True when every parameter is numeric, false as soon as one is not.

  Example:
    is_num(5)                 => true
    is_num("5")               => true
    is_num("abc")             => false
    is_num(1, "x")            => false
    is_num()                  => true

  Notes:
    - Numeric strings may carry surrounding whitespace; empty strings are
      not numeric
    - A parameter whose own evaluation needs a number and fails, such as
      is_num(add("x")), counts as not numeric
    - Numbers too large or too precise for arithmetic, such as "1e30",
      are still numeric
"#;
