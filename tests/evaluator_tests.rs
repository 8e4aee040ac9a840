// tests/evaluator_tests.rs

use std::collections::HashSet;
use std::str::FromStr;

use colexpr::ast::{Function, Node, Program};
use colexpr::evaluator::{EvalError, Evaluator, evaluate};
use colexpr::lexer::tokenize;
use colexpr::parser::parse;
use colexpr::value::Value;
use rust_decimal::Decimal;

fn eval_str(source: &str) -> Result<Vec<Value>, EvalError> {
    let columns: HashSet<String> = ["sepallength".to_string()].into_iter().collect();
    let program = parse(tokenize(source).unwrap(), &columns).unwrap();
    evaluate(&program)
}

fn eval_one(source: &str) -> Value {
    let mut values = eval_str(source).unwrap();
    assert_eq!(values.len(), 1, "Expected a single result for: {}", source);
    values.remove(0)
}

fn program(body: Vec<Node>) -> Program {
    Program { body }
}

fn num(text: &str) -> Value {
    Value::Number(Decimal::from_str(text).unwrap())
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_number_literal() {
    assert_eq!(eval_str("2").unwrap(), vec![Value::from(2)]);
    assert_eq!(eval_one("-1.5"), num("-1.5"));
}

#[test]
fn test_string_literal_is_unchanged() {
    assert_eq!(eval_one(r#"" 5 ""#), Value::String(" 5 ".to_string()));
}

#[test]
fn test_non_numeric_number_literal() {
    let result = evaluate(&program(vec![Node::number("abc")]));
    assert_eq!(result, Err(EvalError::NumericCoercion("abc".to_string())));
}

#[test]
fn test_column_is_unbound() {
    let result = eval_str("sepallength");
    assert_eq!(
        result,
        Err(EvalError::UnboundColumn("sepallength".to_string()))
    );
}

// ============================================================================
// add / subtract
// ============================================================================

#[test]
fn test_add() {
    assert_eq!(eval_one("add(2, 3)"), Value::from(5));
    assert_eq!(eval_one("add(7)"), Value::from(7));
    assert_eq!(eval_one("add(1, 2, 3, 4)"), Value::from(10));
}

#[test]
fn test_add_is_exact_for_decimals() {
    assert_eq!(eval_one("add(0.1, 0.2)"), num("0.3"));
}

#[test]
fn test_add_coerces_numeric_strings() {
    assert_eq!(eval_one(r#"add("1.5", 1)"#), num("2.5"));
}

#[test]
fn test_add_rejects_non_numeric_string() {
    assert_eq!(
        eval_str(r#"add(1, "abc")"#),
        Err(EvalError::NumericCoercion("abc".to_string()))
    );
}

#[test]
fn test_add_rejects_boolean() {
    assert_eq!(
        eval_str("add(is_num(1), 1)"),
        Err(EvalError::NumericCoercion("true".to_string()))
    );
}

#[test]
fn test_add_without_params() {
    assert_eq!(
        eval_str("add()"),
        Err(EvalError::MissingParameters(Function::Add))
    );
}

#[test]
fn test_subtract() {
    assert_eq!(eval_one("subtract(5, 4)"), Value::from(1));
    assert_eq!(eval_one("subtract(2, 3)"), Value::from(-1));
    assert_eq!(eval_one("subtract(10, 3, 2)"), Value::from(5));
    assert_eq!(eval_one("subtract(7)"), Value::from(7));
}

#[test]
fn test_subtract_without_params() {
    let result = eval_str("subtract()");
    assert_eq!(result, Err(EvalError::MissingParameters(Function::Subtract)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Missing parameters for subtract function"
    );
}

#[test]
fn test_nested_calls() {
    assert_eq!(eval_one("add(2, subtract(4, 2))"), Value::from(4));
    assert_eq!(eval_one("subtract(add(1, 1), add(1, 1))"), Value::from(0));
}

#[test]
fn test_add_overflow() {
    let max = Decimal::MAX.to_string();
    let result = evaluate(&program(vec![Node::call(
        "add",
        vec![Node::number(max.clone()), Node::number(max)],
    )]));
    assert_eq!(result, Err(EvalError::NumericOverflow(Function::Add)));
}

#[test]
fn test_subtract_overflow() {
    let max = Decimal::MAX.to_string();
    let result = evaluate(&program(vec![Node::call(
        "subtract",
        vec![Node::number(format!("-{}", max)), Node::number(max)],
    )]));
    assert_eq!(result, Err(EvalError::NumericOverflow(Function::Subtract)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Numeric overflow in subtract function"
    );
}

#[test]
fn test_out_of_range_literal_is_not_a_type_error() {
    let huge = "100000000000000000000000000000";
    assert_eq!(
        eval_str(&format!("add({}, 1)", huge)),
        Err(EvalError::NumberOutOfRange(huge.to_string()))
    );
    assert_eq!(
        eval_str(&format!("subtract(1, {})", huge)),
        Err(EvalError::NumberOutOfRange(huge.to_string()))
    );
    assert_eq!(
        evaluate(&program(vec![Node::number(huge)])),
        Err(EvalError::NumberOutOfRange(huge.to_string()))
    );
}

#[test]
fn test_out_of_range_string_is_not_a_type_error() {
    let result = eval_str(r#"add("1e30", 1)"#);
    assert_eq!(result, Err(EvalError::NumberOutOfRange("1e30".to_string())));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Numeric overflow: '1e30' is out of range"
    );
    assert_eq!(
        eval_str(r#"add("1e-40")"#),
        Err(EvalError::NumberOutOfRange("1e-40".to_string()))
    );
}

// ============================================================================
// is_num
// ============================================================================

#[test]
fn test_is_num() {
    assert_eq!(eval_one("is_num(5)"), Value::Boolean(true));
    assert_eq!(eval_one(r#"is_num("5")"#), Value::Boolean(true));
    assert_eq!(eval_one(r#"is_num("abc")"#), Value::Boolean(false));
    assert_eq!(eval_one(r#"is_num("")"#), Value::Boolean(false));
}

#[test]
fn test_is_num_checks_every_parameter() {
    assert_eq!(eval_one(r#"is_num(1, "x")"#), Value::Boolean(false));
    assert_eq!(eval_one(r#"is_num("x", 1)"#), Value::Boolean(false));
    assert_eq!(eval_one(r#"is_num(1, "2", 3.5)"#), Value::Boolean(true));
}

#[test]
fn test_is_num_without_params_is_vacuously_true() {
    // No parameter fails coercion, so the answer is true
    assert_eq!(eval_one("is_num()"), Value::Boolean(true));
}

#[test]
fn test_is_num_ignores_range() {
    assert_eq!(eval_one(r#"is_num("1e30")"#), Value::Boolean(true));
    assert_eq!(eval_one(r#"is_num("1e-40")"#), Value::Boolean(true));
    assert_eq!(
        eval_one("is_num(100000000000000000000000000000)"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval_one(r#"is_num(1, "-1e30", 100000000000000000000000000000)"#),
        Value::Boolean(true)
    );
}

#[test]
fn test_is_num_of_malformed_number_literal() {
    let result = evaluate(&program(vec![Node::call("is_num", vec![Node::number("abc")])]));
    assert_eq!(result, Ok(vec![Value::Boolean(false)]));
}

#[test]
fn test_is_num_of_boolean() {
    assert_eq!(eval_one("is_num(is_num(1))"), Value::Boolean(false));
}

#[test]
fn test_is_num_swallows_coercion_failure_in_parameter() {
    assert_eq!(eval_one(r#"is_num(add("x"))"#), Value::Boolean(false));
}

#[test]
fn test_is_num_propagates_other_errors() {
    assert_eq!(
        eval_str("is_num(add())"),
        Err(EvalError::MissingParameters(Function::Add))
    );
    assert_eq!(
        eval_str("is_num(sepallength)"),
        Err(EvalError::UnboundColumn("sepallength".to_string()))
    );
}

// ============================================================================
// Unknown functions
// ============================================================================

#[test]
fn test_unknown_function() {
    let result = evaluate(&program(vec![Node::call("multiply", vec![Node::number("2")])]));
    assert_eq!(result, Err(EvalError::UnknownFunction("multiply".to_string())));
}

// ============================================================================
// If conditions
// ============================================================================

#[test]
fn test_if_true_branch() {
    assert_eq!(
        eval_one("if (is_num(5)) { add(2, 3) } else { subtract(2, 3) }"),
        Value::from(5)
    );
}

#[test]
fn test_if_false_branch() {
    assert_eq!(
        eval_one(r#"if (is_num("abc")) { add(2, 3) } else { subtract(2, 3) }"#),
        Value::from(-1)
    );
}

#[test]
fn test_if_truthiness() {
    assert_eq!(eval_one("if (0) { 1 } else { 2 }"), Value::from(2));
    assert_eq!(eval_one("if (0.5) { 1 } else { 2 }"), Value::from(1));
    assert_eq!(eval_one(r#"if ("") { 1 } else { 2 }"#), Value::from(2));
    assert_eq!(eval_one(r#"if ("0") { 1 } else { 2 }"#), Value::from(1));
    assert_eq!(eval_one("if (subtract(1, 1)) { 1 } else { 2 }"), Value::from(2));
}

#[test]
fn test_if_only_evaluates_chosen_branch() {
    // The untaken branch would fail if it were evaluated
    assert_eq!(eval_one("if (1) { 1 } else { add() }"), Value::from(1));
    assert_eq!(eval_one("if (0) { sepallength } else { 2 }"), Value::from(2));
}

#[test]
fn test_if_condition_error_propagates() {
    assert_eq!(
        eval_str("if (add()) { 1 } else { 2 }"),
        Err(EvalError::MissingParameters(Function::Add))
    );
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_statements_keep_source_order() {
    assert_eq!(
        eval_str("add(1,1) subtract(3,1) is_num(\"x\")").unwrap(),
        vec![Value::from(2), Value::from(2), Value::Boolean(false)]
    );
}

#[test]
fn test_first_error_aborts_program() {
    assert_eq!(
        eval_str("add(1, 1) add() subtract(3, 1)"),
        Err(EvalError::MissingParameters(Function::Add))
    );
}

#[test]
fn test_empty_program() {
    assert!(evaluate(&Program::default()).unwrap().is_empty());
}

#[test]
fn test_evaluation_is_repeatable() {
    let columns = HashSet::new();
    let ast = parse(
        tokenize("if (is_num(5)) { add(2, 3) } else { 0 } subtract(9, 4)").unwrap(),
        &columns,
    )
    .unwrap();
    let evaluator = Evaluator::new();

    let first = evaluator.eval_program(&ast).unwrap();
    let second = evaluator.eval_program(&ast).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![Value::from(5), Value::from(5)]);
}
