//! Input normalizer - Turns free-text arguments into ranges and candidate lists

use std::num::IntErrorKind;

use crate::domain::entities::Range;

/// Parse a base-10 integer, returning `fallback` on any failure.
///
/// Integers beyond `i64` saturate to `i64::MAX` / `i64::MIN` so the range
/// clamp still applies to them.
pub fn parse_int(text: &str, fallback: i64) -> i64 {
    match text.trim().parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => fallback,
        },
    }
}

/// Split `/choice` input on `;`, `,`, `|` or newline, dropping empty fragments
pub fn parse_choices(text: &str) -> Vec<String> {
    text.split(['\n', ';', ',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the `/roll` range from its arguments. Never fails.
pub fn normalize_range<S: AsRef<str>>(args: &[S]) -> Range {
    let defaults = Range::default();
    let (low, high) = match args {
        [] => return defaults,
        [high] => (defaults.low, parse_int(high.as_ref(), defaults.high)),
        [low, high, ..] => (
            parse_int(low.as_ref(), defaults.low),
            parse_int(high.as_ref(), defaults.high),
        ),
    };

    Range::new(low, high)
}
