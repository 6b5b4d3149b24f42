//! Expression normalization, parsing, and evaluation.
//!
//! The display string a keypad builds is close to, but not quite, a valid
//! arithmetic expression: it may end in a dangling operator, use `×`/`÷`
//! glyphs, omit explicit multiplication before `(`, or leave parens
//! unclosed. This crate turns such a string into a strictly valid
//! expression, parses it, and computes the result.

pub mod ast;
pub mod error;
pub mod eval;
pub mod format;
pub mod normalize;
pub mod parser;

pub use error::EvalError;
pub use eval::{evaluate, Evaluation};
pub use format::format_number;
