//! Result formatting shared by the evaluator and the percent key.

/// Render a computed value for the display and the history log.
///
/// Integral values drop the trailing `.0` (`6.0` renders as `"6"`, and
/// `-0` collapses to `"0"`); everything else uses the shortest decimal
/// representation of the `f64`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
