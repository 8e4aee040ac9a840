//! Value and token conversion to serde_json

use crate::{Token, Value};

/// Convert evaluation results to a JSON array, one entry per statement
pub fn values_to_json(values: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(values.iter().map(Value::to_json).collect())
}

/// Convert a token stream to a JSON array of `{"kind", "value"}` objects
pub fn tokens_to_json(tokens: &[Token]) -> serde_json::Value {
    serde_json::Value::Array(
        tokens
            .iter()
            .map(|t| {
                serde_json::json!({
                    "kind": format!("{:?}", t.kind),
                    "value": t.value,
                })
            })
            .collect(),
    )
}
