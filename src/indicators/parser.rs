//! Permissive numeric parsing for feed and CSV fields.
//!
//! Nothing here fails: input without a numeric prefix becomes NaN and flows
//! through the pipeline, where it makes every comparison it touches false.

use crate::common::math::round_half_up;

/// Length of the longest decimal-float prefix of `s` (sign, digits, fraction, exponent).
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Parse a decimal price the way loosely-typed feeds expect.
///
/// Leading whitespace is skipped and trailing garbage after the numeric
/// prefix is ignored (`"56.79abc"` is 56.79). No numeric prefix gives NaN.
pub fn parse_price(value: &str) -> f64 {
    let s = value.trim_start();

    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let len = float_prefix_len(s);
    if len == 0 {
        return f64::NAN;
    }
    s[..len].parse::<f64>().unwrap_or(f64::NAN)
}

/// Integer prefix of `value`; any fraction is truncated. No digits gives NaN.
fn parse_integer_prefix(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return f64::NAN;
    }
    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a traded-volume field such as `"12.3M"`, `"45K"` or `"1,234,567"`.
///
/// Thousands separators are stripped first. A literal trailing `M` or `K`
/// scales the number and rounds to the nearest integer; anything else is read
/// as a plain integer.
pub fn parse_volume(value: &str) -> f64 {
    let cleaned = value.replace(',', "");
    if cleaned.ends_with('M') {
        round_half_up(parse_price(&cleaned) * 1_000_000.0, 0)
    } else if cleaned.ends_with('K') {
        round_half_up(parse_price(&cleaned) * 1_000.0, 0)
    } else {
        parse_integer_prefix(&cleaned)
    }
}
