//! Lenient string-to-number coercion for execution result values.
//!
//! Rules:
//! - a missing value coerces to `NaN`
//! - the leading run of characters that cannot start a number is dropped
//! - the longest valid decimal prefix of the remainder is parsed
//! - no valid prefix coerces to `0.0`

/// Coerce a raw value (possibly missing) to `f64`.
pub fn coerce_to_float(value: Option<&str>) -> f64 {
    match value {
        Some(s) => string_to_float(s),
        None => f64::NAN,
    }
}

/// Coerce a string to `f64`, see the module rules.
pub fn string_to_float(value: &str) -> f64 {
    let start = value
        .char_indices()
        .find(|&(i, c)| can_start_number(&value[i..], c))
        .map(|(i, _)| i);
    let Some(start) = start else {
        return 0.0;
    };
    let rest = &value[start..];
    let end = numeric_prefix_len(rest);
    rest[..end].parse::<f64>().unwrap_or(0.0)
}

fn can_start_number(rest: &str, c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    // A sign or dot only counts if a digit (or ".digit") follows.
    numeric_prefix_len(rest) > 0 && matches!(c, '+' | '-' | '.')
}

/// Length in bytes of the longest prefix matching
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn numeric_prefix_len(s: &str) -> usize {
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
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
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
