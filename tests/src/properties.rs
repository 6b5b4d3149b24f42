// Property checks over arbitrary key sequences.

use proptest::prelude::*;

use tally_expr::format_number;
use tally_expr::normalize::normalize;
use tally_keys::{glyph, Token};
use tally_session::{Calculator, ERROR_DISPLAY};

fn any_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        (0u8..=9).prop_map(Token::Digit),
        proptest::sample::select(vec![
            Token::Decimal,
            Token::Add,
            Token::Subtract,
            Token::Multiply,
            Token::Divide,
            Token::LeftParen,
            Token::RightParen,
            Token::Percent,
            Token::PlusMinus,
            Token::Equals,
            Token::Clear,
            Token::Delete,
        ]),
    ]
}

fn operator_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        Just(Token::Add),
        Just(Token::Subtract),
        Just(Token::Multiply),
        Just(Token::Divide),
    ]
}

fn any_session() -> impl Strategy<Value = Vec<Token>> {
    proptest::collection::vec(any_token(), 0..24)
}

fn replay(tokens: &[Token]) -> Calculator {
    let mut calculator = Calculator::default();
    for &token in tokens {
        calculator.apply(token);
    }
    calculator
}

fn operator_glyph(token: Token) -> char {
    match token {
        Token::Add => glyph::ADD,
        Token::Subtract => glyph::SUBTRACT,
        Token::Multiply => glyph::MULTIPLY,
        Token::Divide => glyph::DIVIDE,
        other => panic!("not an operator token: {other}"),
    }
}

/// True when the last numeric run of the display has a `-` directly ahead
/// of it; sign toggling is not an involution there (it wraps instead).
fn last_run_preceded_by_minus(display: &str) -> bool {
    let chars: Vec<char> = display.chars().collect();
    let mut end = chars.len();
    while end > 0 && !(chars[end - 1].is_ascii_digit() || chars[end - 1] == glyph::DECIMAL) {
        end -= 1;
    }
    if end == 0 {
        return false;
    }
    let mut start = end;
    while start > 0 && (chars[start - 1].is_ascii_digit() || chars[start - 1] == glyph::DECIMAL) {
        start -= 1;
    }
    start > 0 && chars[start - 1] == glyph::SUBTRACT
}

proptest! {
    #[test]
    fn repeated_decimal_is_idempotent(tokens in any_session()) {
        let mut calculator = replay(&tokens);
        calculator.apply(Token::Decimal);
        let once = calculator.display();
        calculator.apply(Token::Decimal);
        prop_assert_eq!(calculator.display(), once);
    }

    #[test]
    fn first_digit_replaces_the_leading_zero(digit in 0u8..=9) {
        let mut calculator = Calculator::default();
        calculator.apply(Token::Digit(digit));
        prop_assert_eq!(calculator.display(), digit.to_string());
    }

    #[test]
    fn operators_never_stack(
        tokens in any_session(),
        first in operator_token(),
        second in operator_token(),
    ) {
        let mut calculator = replay(&tokens);
        calculator.apply(first);
        let before = calculator.display();
        prop_assume!(before.chars().next_back().is_some_and(glyph::is_operator));

        calculator.apply(second);
        let mut expected = before.clone();
        expected.pop();
        expected.push(operator_glyph(second));
        prop_assert_eq!(calculator.display(), expected);
    }

    #[test]
    fn normalized_expressions_balance_parens(tokens in any_session()) {
        let calculator = replay(&tokens);
        if let Some(expression) = normalize(&calculator.display()) {
            let opens = expression.matches(glyph::LEFT_PAREN).count();
            let closes = expression.matches(glyph::RIGHT_PAREN).count();
            prop_assert_eq!(opens, closes);
        }
    }

    #[test]
    fn formatting_round_trips(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let formatted = format_number(value);
        let reparsed: f64 = formatted.parse().unwrap();
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn sign_toggle_is_an_involution(tokens in any_session()) {
        let mut calculator = replay(&tokens);
        let before = calculator.display();
        prop_assume!(before != ERROR_DISPLAY);
        prop_assume!(!last_run_preceded_by_minus(&before));

        calculator.apply(Token::PlusMinus);
        calculator.apply(Token::PlusMinus);
        prop_assert_eq!(calculator.display(), before);
    }
}
