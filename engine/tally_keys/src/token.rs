//! The keypad token alphabet.

use std::fmt;

use logos::Logos;

/// A single discrete keypad input.
///
/// Tokens are stateless values; only the expression buffer carries state.
/// The enum doubles as the keystroke lexer: `Token::lexer("12+3=")` yields
/// `[Digit(1), Digit(2), Add, Digit(3), Equals]`. ASCII aliases (`*`, `/`,
/// `~`) map onto the display glyphs (`×`, `÷`, `±`), and whitespace is
/// skipped. Any other character is a lex error carrying its span.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// A digit key, `0` through `9`.
    #[regex(r"[0-9]", |lex| lex.slice().parse().ok())]
    Digit(u8),
    /// The decimal point key.
    #[token(".")]
    Decimal,
    /// The addition key.
    #[token("+")]
    Add,
    /// The subtraction key.
    #[token("-")]
    Subtract,
    /// The multiplication key, displayed as `×`.
    #[token("×")]
    #[token("*")]
    Multiply,
    /// The division key, displayed as `÷`.
    #[token("÷")]
    #[token("/")]
    Divide,
    /// The opening parenthesis key.
    #[token("(")]
    LeftParen,
    /// The closing parenthesis key.
    #[token(")")]
    RightParen,
    /// The percent key.
    #[token("%")]
    Percent,
    /// The sign-toggle key, displayed as `±`.
    #[token("±")]
    #[token("~")]
    PlusMinus,
    /// The evaluate key.
    #[token("=")]
    Equals,
    /// The clear key; resets the display.
    #[token("c")]
    #[token("C")]
    Clear,
    /// The delete key, displayed as `⌫`; removes the last character.
    #[token("d")]
    #[token("D")]
    #[token("⌫")]
    Delete,
}

impl Token {
    /// Returns true for the four binary operator keys.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Add | Token::Subtract | Token::Multiply | Token::Divide
        )
    }

    /// Returns true for the keys that begin a fresh expression when the
    /// display shows an error: digits, `(`, `.`, and `±`.
    pub fn starts_fresh_expression(&self) -> bool {
        matches!(
            self,
            Token::Digit(_) | Token::LeftParen | Token::Decimal | Token::PlusMinus
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(n) => write!(f, "{n}"),
            Token::Decimal => f.write_str("."),
            Token::Add => f.write_str("+"),
            Token::Subtract => f.write_str("-"),
            Token::Multiply => f.write_str("×"),
            Token::Divide => f.write_str("÷"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Percent => f.write_str("%"),
            Token::PlusMinus => f.write_str("±"),
            Token::Equals => f.write_str("="),
            Token::Clear => f.write_str("C"),
            Token::Delete => f.write_str("⌫"),
        }
    }
}
