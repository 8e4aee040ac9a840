//! Run colexpr expressions end to end

use std::collections::HashSet;

use tracing::debug;

use super::{CliError, tokens_to_json, values_to_json};
use crate::{Value, evaluate, parse, tokenize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Source text of the program
    pub expression: String,
    /// Column names that may appear as identifiers
    pub columns: Vec<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Program evaluated; one JSON entry per top-level statement
    Success(serde_json::Value),
}

fn column_set(columns: &[String]) -> HashSet<String> {
    columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize, parse and evaluate source text in one go
pub fn run(source: &str, columns: &HashSet<String>) -> Result<Vec<Value>, CliError> {
    let tokens = tokenize(source)?;
    let program = parse(tokens, columns)?;
    Ok(evaluate(&program)?)
}

/// Execute a colexpr check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.expression.trim().is_empty() {
        return Err(CliError::NoInput);
    }
    let columns = column_set(&options.columns);
    debug!(columns = columns.len(), syntax_only = options.syntax_only, "check");

    if options.syntax_only {
        let tokens = tokenize(&options.expression)?;
        parse(tokens, &columns)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let values = run(&options.expression, &columns)?;
    Ok(CheckResult::Success(values_to_json(&values)))
}

/// Tokenize source text and return the token stream as JSON
pub fn execute_tokens(expression: &str) -> Result<serde_json::Value, CliError> {
    let tokens = tokenize(expression)?;
    Ok(tokens_to_json(&tokens))
}
