//! Sandboxed arithmetic expression evaluation
//!
//! Evaluates the `$( ... )` sublanguage against a set of bindings. The
//! evaluator is a small parser/interpreter over a closed grammar: numeric
//! operators, one comparison, and a fixed builtin table (`min`, `max`,
//! `abs`, and the degree-argument `sin`/`cos`). It exposes no statement
//! execution and no access to anything beyond the bindings it is given.

mod expression;
mod operations;

use crate::semantic::Bindings;
use crate::TenetResult;
use rust_decimal::Decimal;

/// Evaluate an expression source against the given bindings, producing
/// the canonical textual form of the value.
///
/// Every binding whose text parses as a decimal number is substituted
/// numerically; any other binding is substituted as raw text. Numbers
/// render normalized (`5`, not `5.0`), truth values render as
/// `true`/`false`, and text passes through unchanged.
pub fn evaluate(source: &str, bindings: &Bindings) -> TenetResult<String> {
    Ok(expression::evaluate_expression(source, bindings)?.render())
}

/// An intermediate value inside an expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Number(Decimal),
    Text(String),
    Truth(bool),
}

impl Value {
    /// Substitute a binding: numeric when the text parses as a decimal,
    /// raw text otherwise.
    pub(crate) fn from_text(text: &str) -> Self {
        match text.parse::<Decimal>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(text.to_string()),
        }
    }

    /// Canonical textual form
    pub(crate) fn render(&self) -> String {
        match self {
            Value::Number(number) => number.normalize().to_string(),
            Value::Text(text) => text.clone(),
            Value::Truth(truth) => truth.to_string(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Truth(_) => "boolean",
        }
    }
}
