use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::{
    ast::{Function, Node, Program},
    value::{NumberError, Value, is_numeric_text, parse_number},
};

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// `add`/`subtract` called without parameters
    MissingParameters(Function),

    /// A value that must be numeric is not (holds the offending value's text)
    NumericCoercion(String),

    /// Call to a function outside the built-in vocabulary
    UnknownFunction(String),

    /// Column reference with no binding to evaluate against
    UnboundColumn(String),

    /// Arithmetic result does not fit the numeric range
    NumericOverflow(Function),

    /// Well-formed number too large or too precise to represent
    NumberOutOfRange(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::MissingParameters(func) => {
                write!(f, "Missing parameters for {} function", func)
            }
            EvalError::NumericCoercion(value) => {
                write!(f, "Type error: '{}' is not a number", value)
            }
            EvalError::UnknownFunction(name) => write!(f, "Unknown function: {}", name),
            EvalError::UnboundColumn(name) => {
                write!(f, "Unbound column: {} has no value to evaluate against", name)
            }
            EvalError::NumericOverflow(func) => write!(f, "Numeric overflow in {} function", func),
            EvalError::NumberOutOfRange(value) => {
                write!(f, "Numeric overflow: '{}' is out of range", value)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Tree-walking evaluator.
///
/// Holds no state between calls, so evaluating the same program twice gives
/// the same result.
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every top-level statement of a program, in order.
    ///
    /// The first error aborts the whole evaluation.
    ///
    /// # Examples
    ///
    /// ```
    /// use colexpr::{Evaluator, Node, Program, Value};
    ///
    /// let program = Program {
    ///     body: vec![
    ///         Node::call("add", vec![Node::number("1"), Node::number("1")]),
    ///         Node::call("subtract", vec![Node::number("3"), Node::number("1")]),
    ///     ],
    /// };
    ///
    /// let result = Evaluator::new().eval_program(&program).unwrap();
    /// assert_eq!(result, vec![Value::from(2), Value::from(2)]);
    /// ```
    pub fn eval_program(&self, program: &Program) -> Result<Vec<Value>, EvalError> {
        debug!(statements = program.body.len(), "evaluating program");
        program
            .body
            .iter()
            .map(|node| self.eval_node(node))
            .collect()
    }

    pub fn eval_node(&self, node: &Node) -> Result<Value, EvalError> {
        trace!(kind = node.kind(), "eval");
        match node {
            Node::NumberLiteral { value } => parse_number(value)
                .map(Value::Number)
                .map_err(|e| number_error(e, value)),
            Node::StringLiteral { value } => Ok(Value::String(value.clone())),
            Node::ColumnName { name } => Err(EvalError::UnboundColumn(name.clone())),
            Node::CallExpression { name, params } => self.eval_call(name, params),
            Node::IfCondition {
                condition,
                true_body,
                false_body,
            } => {
                if self.eval_node(condition)?.is_truthy() {
                    self.eval_node(true_body)
                } else {
                    self.eval_node(false_body)
                }
            }
        }
    }

    fn eval_call(&self, name: &str, params: &[Node]) -> Result<Value, EvalError> {
        let func =
            Function::lookup(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
        match func {
            Function::Add => self.func_add(params),
            Function::Subtract => self.func_subtract(params),
            Function::IsNum => self.func_is_num(params),
        }
    }

    fn eval_numbers(&self, func: Function, params: &[Node]) -> Result<Vec<Decimal>, EvalError> {
        if params.is_empty() {
            return Err(EvalError::MissingParameters(func));
        }
        params
            .iter()
            .map(|param| {
                let value = self.eval_node(param)?;
                value
                    .to_number()
                    .map_err(|e| number_error(e, &value.to_string()))
            })
            .collect()
    }

    /// add(a, b, ...) - sum from 0, left to right
    fn func_add(&self, params: &[Node]) -> Result<Value, EvalError> {
        let numbers = self.eval_numbers(Function::Add, params)?;
        numbers
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, n| acc.checked_add(n))
            .map(Value::Number)
            .ok_or(EvalError::NumericOverflow(Function::Add))
    }

    /// subtract(a, b, ...) - a minus each following parameter
    fn func_subtract(&self, params: &[Node]) -> Result<Value, EvalError> {
        let numbers = self.eval_numbers(Function::Subtract, params)?;
        let (first, rest) = numbers
            .split_first()
            .ok_or(EvalError::MissingParameters(Function::Subtract))?;
        rest.iter()
            .try_fold(*first, |acc, n| acc.checked_sub(*n))
            .map(Value::Number)
            .ok_or(EvalError::NumericOverflow(Function::Subtract))
    }

    /// is_num(a, ...) - false as soon as one parameter is not numeric.
    ///
    /// With no parameters there is nothing that fails, so the answer is true.
    /// Numeric text counts even when it is outside the representable range.
    fn func_is_num(&self, params: &[Node]) -> Result<Value, EvalError> {
        for param in params {
            if let Node::NumberLiteral { value } = param {
                if !is_numeric_text(value) {
                    return Ok(Value::Boolean(false));
                }
                continue;
            }
            let numeric = match self.eval_node(param) {
                Ok(value) => value.is_numeric(),
                Err(EvalError::NumericCoercion(_)) => false,
                Err(e) => return Err(e),
            };
            if !numeric {
                return Ok(Value::Boolean(false));
            }
        }
        Ok(Value::Boolean(true))
    }
}

fn number_error(err: NumberError, text: &str) -> EvalError {
    match err {
        NumberError::NotNumeric => EvalError::NumericCoercion(text.to_string()),
        NumberError::OutOfRange => EvalError::NumberOutOfRange(text.to_string()),
    }
}

/// Evaluate a program with a fresh [`Evaluator`].
pub fn evaluate(program: &Program) -> Result<Vec<Value>, EvalError> {
    Evaluator::new().eval_program(program)
}
