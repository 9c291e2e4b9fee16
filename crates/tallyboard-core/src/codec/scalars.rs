//! Text forms of scalar settings values.
//!
//! The settings file was historically written by a .NET program, so booleans
//! are `True`/`False` and numbers use the invariant (`.` decimal) format.
//! Every parser returns `None` on malformed input; callers choose the default.

/// Parses a boolean, case-insensitively, ignoring surrounding whitespace.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Formats a boolean as `True` or `False`.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Parses a signed integer, ignoring surrounding whitespace.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parses a finite floating-point number, ignoring surrounding whitespace.
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a float in its shortest round-trip form (`216`, not `216.0`).
pub fn format_float(value: f64) -> String {
    value.to_string()
}
