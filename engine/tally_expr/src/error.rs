use thiserror::Error;

/// Why an evaluation failed.
///
/// Failures are ordinary values, never panics: the session layer maps any
/// of these onto its error screen and the process carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression divides by zero somewhere.
    #[error("division by zero")]
    DivisionByZero,
    /// The normalized string is not a well-formed expression.
    #[error("malformed expression: {0}")]
    Malformed(String),
    /// The computation left the range of finite numbers.
    #[error("result is not a finite number")]
    Overflow,
}
