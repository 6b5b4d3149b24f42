// End-to-end keypad scenarios driven through the lexer, the state
// machine, and the evaluator together.

use logos::Logos;
use pretty_assertions::assert_eq;

use tally_keys::Token;
use tally_session::{Calculator, KeyboardStyle, ERROR_DISPLAY};

fn type_keys(calculator: &mut Calculator, keys: &str) {
    for token in Token::lexer(keys) {
        calculator.apply(token.expect("test key sequences should lex"));
    }
}

fn session(keys: &str) -> Calculator {
    let mut calculator = Calculator::default();
    type_keys(&mut calculator, keys);
    calculator
}

#[test]
fn addition_records_history() {
    let calculator = session("7+3=");
    assert_eq!(calculator.display(), "10");
    assert_eq!(calculator.history_entries(), vec!["7+3 = 10".to_string()]);
}

#[test]
fn division_by_zero_errors_without_history() {
    let calculator = session("5/0=");
    assert_eq!(calculator.display(), ERROR_DISPLAY);
    assert!(calculator.history().is_empty());
}

#[test]
fn implicit_multiplication_is_inserted() {
    let calculator = session("2(3+4)=");
    assert_eq!(calculator.display(), "14");
    assert_eq!(
        calculator.history_entries(),
        vec!["2*(3+4) = 14".to_string()]
    );
}

#[test]
fn plus_minus_is_inert_on_the_initial_display() {
    let calculator = session("~=");
    assert_eq!(calculator.display(), "0");
    assert!(calculator.history().is_empty());
}

#[test]
fn plus_minus_negates_a_typed_number() {
    let calculator = session("5~");
    assert_eq!(calculator.display(), "-5");
}

#[test]
fn binary_minus_then_toggle_wraps_the_operand() {
    let calculator = session("10-5~");
    assert_eq!(calculator.display(), "10-(-5)");
}

#[test]
fn classic_percent_does_not_evaluate() {
    let calculator = session("50%");
    assert_eq!(calculator.display(), "0.5");
    assert!(calculator.history().is_empty());
}

#[test]
fn fast_percent_evaluates_and_records() {
    let mut calculator = Calculator::new(KeyboardStyle::Fast);
    type_keys(&mut calculator, "50%");
    assert_eq!(calculator.display(), "0.5");
    assert_eq!(calculator.history_entries(), vec!["0.5 = 0.5".to_string()]);
}

#[test]
fn dangling_operator_is_dropped_on_evaluate() {
    let calculator = session("6*7/=");
    assert_eq!(calculator.display(), "42");
    assert_eq!(calculator.history_entries(), vec!["6*7 = 42".to_string()]);
}

#[test]
fn unclosed_parens_are_balanced_on_evaluate() {
    let calculator = session("2(3+4=");
    assert_eq!(calculator.display(), "14");
    assert_eq!(
        calculator.history_entries(),
        vec!["2*(3+4) = 14".to_string()]
    );
}

#[test]
fn chained_evaluations_accumulate_history() {
    let mut calculator = session("7+3=");
    type_keys(&mut calculator, "*2=");
    assert_eq!(calculator.display(), "20");
    assert_eq!(
        calculator.history_entries(),
        vec!["7+3 = 10".to_string(), "10*2 = 20".to_string()]
    );

    calculator.clear_history();
    assert!(calculator.history().is_empty());
    assert_eq!(calculator.display(), "20");
}

#[test]
fn error_state_recovers_through_a_digit() {
    let mut calculator = session("5/0=");
    assert_eq!(calculator.display(), ERROR_DISPLAY);

    // Operators are ignored while the error shows.
    type_keys(&mut calculator, "+8");
    assert_eq!(calculator.display(), "8");

    type_keys(&mut calculator, "+2=");
    assert_eq!(calculator.display(), "10");
    assert_eq!(calculator.history_entries(), vec!["8+2 = 10".to_string()]);
}

#[test]
fn clear_key_restarts_the_expression() {
    let mut calculator = session("123");
    assert_eq!(calculator.display(), "123");
    type_keys(&mut calculator, "c7");
    assert_eq!(calculator.display(), "7");
}

#[test]
fn delete_key_edits_one_character_at_a_time() {
    let mut calculator = session("12+45");
    type_keys(&mut calculator, "d");
    assert_eq!(calculator.display(), "12+4");
    type_keys(&mut calculator, "dd");
    assert_eq!(calculator.display(), "12");
}

#[test]
fn decimal_expressions_evaluate_exactly() {
    let calculator = session("1.5+2.25=");
    assert_eq!(calculator.display(), "3.75");
    assert_eq!(
        calculator.history_entries(),
        vec!["1.5+2.25 = 3.75".to_string()]
    );
}

#[test]
fn fraction_born_from_a_bare_decimal_point() {
    let calculator = session("(.5+.5)=");
    assert_eq!(calculator.display(), "1");
    assert_eq!(
        calculator.history_entries(),
        vec!["(.5+.5) = 1".to_string()]
    );
}

#[test]
fn percent_applies_to_the_trailing_operand_only() {
    let calculator = session("200+50%=");
    assert_eq!(calculator.display(), "200.5");
    assert_eq!(
        calculator.history_entries(),
        vec!["200+0.5 = 200.5".to_string()]
    );
}
