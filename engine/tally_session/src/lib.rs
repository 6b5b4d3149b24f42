//! Session state for the tally calculator engine.
//!
//! One logical session owns an expression buffer and a history log. Tokens
//! arrive one at a time through [`Calculator::apply`]; everything runs to
//! completion synchronously, so a hosting environment that mixes input
//! sources must serialize its calls.

pub mod buffer;
pub mod history;
pub mod machine;

pub use buffer::{ExpressionBuffer, Operator, Segment};
pub use history::{History, HistoryEntry};
pub use machine::{Calculator, KeyboardStyle, ERROR_DISPLAY};
