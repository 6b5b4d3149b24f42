//! The evaluation entry point.

use log::debug;

use crate::ast::{BinaryOperator, ExpressionNode};
use crate::error::EvalError;
use crate::format::format_number;
use crate::normalize::normalize;
use crate::parser::parse_expression;

/// Outcome of a successful `evaluate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Nothing was left to evaluate after trailing sanitation; the caller
    /// keeps its buffer untouched.
    Empty,
    /// A value was computed. `expression` is the normalized form (what the
    /// history records), `result` the formatted value (what the display
    /// becomes).
    Value {
        /// The expression after sanitation, implicit multiplication,
        /// balancing, and glyph substitution.
        expression: String,
        /// The formatted numeric result.
        result: String,
    },
}

/// Evaluate a display string.
///
/// Pure and deterministic: the same input always produces the same
/// outcome, and nothing is mutated. Failures come back as [`EvalError`]
/// values for the caller to turn into its error state.
pub fn evaluate(display: &str) -> Result<Evaluation, EvalError> {
    let Some(expression) = normalize(display) else {
        return Ok(Evaluation::Empty);
    };
    debug!("evaluating {display:?} as {expression:?}");
    let node = parse_expression(&expression)?;
    let value = execute(&node)?;
    if !value.is_finite() {
        return Err(EvalError::Overflow);
    }
    let result = format_number(value);
    Ok(Evaluation::Value { expression, result })
}

/// Walk an AST and compute its value.
pub fn execute(node: &ExpressionNode) -> Result<f64, EvalError> {
    match node {
        ExpressionNode::Number(value) => Ok(*value),
        ExpressionNode::Negation(inner) => Ok(-execute(inner)?),
        ExpressionNode::Binary(binary) => {
            let left = execute(&binary.left)?;
            let right = execute(&binary.right)?;
            match binary.operator {
                BinaryOperator::Add => Ok(left + right),
                BinaryOperator::Sub => Ok(left - right),
                BinaryOperator::Mul => Ok(left * right),
                BinaryOperator::Div => {
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    Ok(left / right)
                }
            }
        }
    }
}
