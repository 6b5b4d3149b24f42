//! Turning a display string into a strictly valid expression.
//!
//! The pipeline runs in a fixed order: trailing sanitation, implicit
//! multiplication, paren balancing, glyph substitution. The output of the
//! last step is both what the parser sees and what the history records.

use tally_keys::glyph;

/// Strip trailing characters that cannot end a well-formed expression:
/// operators, opening parens, and a dangling decimal point.
pub fn sanitize_trailing(display: &str) -> &str {
    let mut expr = display;
    while let Some(c) = expr.chars().next_back() {
        if glyph::is_operator(c) || c == glyph::LEFT_PAREN || c == glyph::DECIMAL {
            expr = &expr[..expr.len() - c.len_utf8()];
        } else {
            break;
        }
    }
    expr
}

/// Insert `*` wherever a value abuts an opening paren: `2(3)` reads as
/// `2*(3)`, `)(` as `)*(`.
pub fn insert_implicit_multiplication(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 2);
    let mut prev: Option<char> = None;
    for c in expr.chars() {
        if c == glyph::LEFT_PAREN
            && prev.is_some_and(|p| p.is_ascii_digit() || p == glyph::RIGHT_PAREN)
        {
            out.push('*');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Append the closing parens the typist never got around to.
pub fn balance_parens(mut expr: String) -> String {
    let opens = expr.chars().filter(|&c| c == glyph::LEFT_PAREN).count();
    let closes = expr.chars().filter(|&c| c == glyph::RIGHT_PAREN).count();
    for _ in closes..opens {
        expr.push(glyph::RIGHT_PAREN);
    }
    expr
}

/// Replace the keypad glyphs with the operators the parser understands.
pub fn substitute_glyphs(expr: &str) -> String {
    expr.replace(glyph::MULTIPLY, "*").replace(glyph::DIVIDE, "/")
}

/// Run the full pipeline. Returns `None` when nothing evaluable remains
/// after sanitation.
pub fn normalize(display: &str) -> Option<String> {
    let trimmed = sanitize_trailing(display);
    if trimmed.is_empty() {
        return None;
    }
    let expr = insert_implicit_multiplication(trimmed);
    let expr = balance_parens(expr);
    Some(substitute_glyphs(&expr))
}
