//! The keypad state machine.

use log::{debug, trace};

use tally_expr::{evaluate, Evaluation};
use tally_keys::Token;

use crate::buffer::{ExpressionBuffer, Operator};
use crate::history::{History, HistoryEntry};

/// What the display shows after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Percent-key behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardStyle {
    /// Percent rewrites the last run and waits for an explicit `=`.
    #[default]
    Classic,
    /// Percent rewrites the last run and evaluates immediately.
    Fast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Expression(ExpressionBuffer),
    Error,
}

/// One calculator session: the live expression, its history, and the
/// configured keypad style. Apply one token per user input event; every
/// call runs to completion before the next is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculator {
    screen: Screen,
    history: History,
    style: KeyboardStyle,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(KeyboardStyle::Classic)
    }
}

impl Calculator {
    /// A fresh session showing `"0"` with an empty history.
    pub fn new(style: KeyboardStyle) -> Self {
        Self {
            screen: Screen::Expression(ExpressionBuffer::new()),
            history: History::new(),
            style,
        }
    }

    /// The string to render: the live expression, or the error sentinel.
    pub fn display(&self) -> String {
        match &self.screen {
            Screen::Expression(buffer) => buffer.to_string(),
            Screen::Error => ERROR_DISPLAY.to_string(),
        }
    }

    /// The configured percent-key style.
    pub fn style(&self) -> KeyboardStyle {
        self.style
    }

    /// The history log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Rendered history lines, oldest first.
    pub fn history_entries(&self) -> Vec<String> {
        self.history
            .entries()
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }

    /// Drop every history entry.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Apply one keypad token. Invalid keystrokes are ignored silently;
    /// the only observable failure surface is the error display.
    pub fn apply(&mut self, token: Token) {
        trace!("apply {token}");
        if matches!(self.screen, Screen::Error) {
            self.recover(token);
            return;
        }
        match token {
            Token::Clear => self.screen = Screen::Expression(ExpressionBuffer::new()),
            Token::Equals => self.evaluate_screen(),
            Token::PlusMinus => self.with_buffer(|buffer| buffer.toggle_sign()),
            Token::Percent => {
                self.with_buffer(|buffer| buffer.apply_percent());
                if self.style == KeyboardStyle::Fast {
                    self.evaluate_screen();
                }
            }
            Token::Decimal => self.with_buffer(|buffer| buffer.push_decimal()),
            Token::Delete => self.with_buffer(|buffer| buffer.delete_last()),
            Token::Add => self.with_buffer(|buffer| buffer.push_operator(Operator::Add)),
            Token::Subtract => self.with_buffer(|buffer| buffer.push_operator(Operator::Subtract)),
            Token::Multiply => self.with_buffer(|buffer| buffer.push_operator(Operator::Multiply)),
            Token::Divide => self.with_buffer(|buffer| buffer.push_operator(Operator::Divide)),
            Token::RightParen => self.with_buffer(|buffer| buffer.push_right_paren()),
            Token::LeftParen => self.with_buffer(|buffer| buffer.push_left_paren()),
            Token::Digit(digit) => self.with_buffer(|buffer| buffer.push_digit(digit)),
        }
    }

    /// Error-state handling: `Clear`/`Delete` restart at `"0"`; digits,
    /// `(`, `.`, and `±` restart a fresh expression with their own glyph.
    /// Everything else is ignored.
    fn recover(&mut self, token: Token) {
        let fresh = match token {
            Token::Clear | Token::Delete => ExpressionBuffer::new(),
            // The sign toggle restarts with the sign it would insert.
            Token::PlusMinus => ExpressionBuffer::from_display("-"),
            _ if token.starts_fresh_expression() => {
                ExpressionBuffer::from_display(&token.to_string())
            }
            _ => return,
        };
        self.screen = Screen::Expression(fresh);
    }

    fn with_buffer(&mut self, f: impl FnOnce(&mut ExpressionBuffer)) {
        if let Screen::Expression(buffer) = &mut self.screen {
            f(buffer);
        }
    }

    fn evaluate_screen(&mut self) {
        let Screen::Expression(buffer) = &self.screen else {
            return;
        };
        // Pressing = on the untouched display does nothing; no entry.
        if buffer.is_initial() {
            return;
        }
        match evaluate(&buffer.to_string()) {
            Ok(Evaluation::Empty) => {}
            Ok(Evaluation::Value { expression, result }) => {
                debug!("{expression} = {result}");
                self.history.push(HistoryEntry::new(expression, result.clone()));
                self.screen = Screen::Expression(ExpressionBuffer::from_display(&result));
            }
            Err(error) => {
                debug!("evaluation failed: {error}");
                self.screen = Screen::Error;
            }
        }
    }
}
