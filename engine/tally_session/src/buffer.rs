//! The expression buffer, kept as typed segments.
//!
//! Instead of a flat string mutated by substring search, the buffer is an
//! ordered sequence of typed segments with incrementally maintained paren
//! counters, so "last numeric run", "trailing operator", and the paren
//! balance are structural lookups. `Display` renders the exact string a
//! keypad would have built.

use std::fmt;

use tally_expr::format_number;
use tally_keys::glyph;

/// A binary operator as it appears in the display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The character this operator renders as.
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => glyph::ADD,
            Operator::Subtract => glyph::SUBTRACT,
            Operator::Multiply => glyph::MULTIPLY,
            Operator::Divide => glyph::DIVIDE,
        }
    }
}

/// One typed piece of the display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A maximal numeric run: digits with at most one decimal point.
    Number(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// The expression as typed so far. Always renders non-empty; a fresh
/// buffer renders as `"0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer {
    segments: Vec<Segment>,
    open_parens: usize,
    close_parens: usize,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// A fresh buffer showing `"0"`.
    pub fn new() -> Self {
        Self {
            segments: vec![Segment::Number("0".to_string())],
            open_parens: 0,
            close_parens: 0,
        }
    }

    /// Rebuild a buffer from a rendered display string (digits, `.`, the
    /// four operator glyphs, parens). Used to install an evaluation result
    /// and to restart after an error. Unknown characters are dropped; an
    /// empty input falls back to `"0"`.
    pub fn from_display(display: &str) -> Self {
        let mut buffer = Self {
            segments: Vec::new(),
            open_parens: 0,
            close_parens: 0,
        };
        for c in display.chars() {
            match c {
                glyph::ADD => buffer.segments.push(Segment::Operator(Operator::Add)),
                glyph::SUBTRACT => buffer.segments.push(Segment::Operator(Operator::Subtract)),
                glyph::MULTIPLY => buffer.segments.push(Segment::Operator(Operator::Multiply)),
                glyph::DIVIDE => buffer.segments.push(Segment::Operator(Operator::Divide)),
                glyph::LEFT_PAREN => {
                    buffer.segments.push(Segment::LeftParen);
                    buffer.open_parens += 1;
                }
                glyph::RIGHT_PAREN => {
                    buffer.segments.push(Segment::RightParen);
                    buffer.close_parens += 1;
                }
                c if c.is_ascii_digit() || c == glyph::DECIMAL => {
                    match buffer.segments.last_mut() {
                        Some(Segment::Number(run)) => run.push(c),
                        _ => buffer.segments.push(Segment::Number(c.to_string())),
                    }
                }
                _ => {}
            }
        }
        if buffer.segments.is_empty() {
            buffer.segments.push(Segment::Number("0".to_string()));
        }
        buffer
    }

    /// True while the buffer still shows the untouched `"0"`.
    pub fn is_initial(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Number(run)] if run == "0")
    }

    /// Typed segments, in display order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A digit key. The untouched `"0"` is replaced, never extended.
    pub fn push_digit(&mut self, digit: u8) {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.is_initial() {
            self.segments[0] = Segment::Number(c.to_string());
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Number(run)) => run.push(c),
            _ => self.segments.push(Segment::Number(c.to_string())),
        }
    }

    /// The decimal point key. A run carries at most one point; after an
    /// operator or paren a fresh `"."` run starts.
    pub fn push_decimal(&mut self) {
        match self.segments.last_mut() {
            Some(Segment::Number(run)) => {
                if !run.contains(glyph::DECIMAL) {
                    run.push(glyph::DECIMAL);
                }
            }
            _ => self
                .segments
                .push(Segment::Number(glyph::DECIMAL.to_string())),
        }
    }

    /// An operator key. Nothing may follow `(` except unary minus, and
    /// only one trailing operator survives: typing a second one replaces
    /// the first.
    pub fn push_operator(&mut self, operator: Operator) {
        match self.segments.last_mut() {
            Some(Segment::LeftParen) if operator != Operator::Subtract => {}
            Some(Segment::Operator(last)) => *last = operator,
            _ => self.segments.push(Segment::Operator(operator)),
        }
    }

    /// The `(` key. Replaces the untouched `"0"`, appends anywhere else.
    pub fn push_left_paren(&mut self) {
        if self.is_initial() {
            self.segments.clear();
        }
        self.segments.push(Segment::LeftParen);
        self.open_parens += 1;
    }

    /// The `)` key. Accepted only while some `(` remains unmatched.
    pub fn push_right_paren(&mut self) {
        if self.open_parens > self.close_parens {
            self.segments.push(Segment::RightParen);
            self.close_parens += 1;
        }
    }

    /// The delete key: remove the last rendered character, falling back to
    /// `"0"` when nothing would remain.
    pub fn delete_last(&mut self) {
        if self.rendered_len() <= 1 {
            self.reset();
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Number(run)) if run.len() > 1 => {
                run.pop();
            }
            Some(Segment::LeftParen) => {
                self.segments.pop();
                self.open_parens -= 1;
            }
            Some(Segment::RightParen) => {
                self.segments.pop();
                self.close_parens -= 1;
            }
            Some(_) => {
                self.segments.pop();
            }
            None => self.reset(),
        }
    }

    /// The sign-toggle key, applied to the last numeric run.
    ///
    /// A minus directly ahead of the run is removed when it is a negation
    /// sign (buffer start, or preceded by `+ × ÷ (`). A binary minus stays
    /// and the run is wrapped as `(-run)` instead, so the rendered string
    /// never reads `a--b`. Otherwise a minus is inserted ahead of the run.
    pub fn toggle_sign(&mut self) {
        if self.is_initial() {
            return;
        }
        let Some(i) = self.last_number_index() else {
            return;
        };
        let preceded_by_minus =
            i >= 1 && matches!(self.segments[i - 1], Segment::Operator(Operator::Subtract));
        if preceded_by_minus {
            let negation = i == 1
                || matches!(
                    self.segments[i - 2],
                    Segment::Operator(Operator::Add | Operator::Multiply | Operator::Divide)
                        | Segment::LeftParen
                );
            if negation {
                self.segments.remove(i - 1);
            } else {
                self.segments.insert(i, Segment::LeftParen);
                self.segments
                    .insert(i + 1, Segment::Operator(Operator::Subtract));
                self.segments.insert(i + 3, Segment::RightParen);
                self.open_parens += 1;
                self.close_parens += 1;
            }
        } else {
            self.segments.insert(i, Segment::Operator(Operator::Subtract));
        }
    }

    /// The percent key: reread the last numeric run as a hundredth.
    /// Unparsable runs (a bare `"."`) leave the buffer alone.
    pub fn apply_percent(&mut self) {
        let Some(i) = self.last_number_index() else {
            return;
        };
        let Segment::Number(run) = &self.segments[i] else {
            return;
        };
        let Ok(value) = run.parse::<f64>() else {
            return;
        };
        self.segments[i] = Segment::Number(format_number(value / 100.0));
    }

    fn last_number_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .rposition(|segment| matches!(segment, Segment::Number(_)))
    }

    fn rendered_len(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Number(run) => run.chars().count(),
                _ => 1,
            })
            .sum()
    }

    fn reset(&mut self) {
        self.segments.clear();
        self.segments.push(Segment::Number("0".to_string()));
        self.open_parens = 0;
        self.close_parens = 0;
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Number(run) => f.write_str(run)?,
                Segment::Operator(operator) => write!(f, "{}", operator.glyph())?,
                Segment::LeftParen => write!(f, "{}", glyph::LEFT_PAREN)?,
                Segment::RightParen => write!(f, "{}", glyph::RIGHT_PAREN)?,
            }
        }
        Ok(())
    }
}
