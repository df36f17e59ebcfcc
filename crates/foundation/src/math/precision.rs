//! Precision policies.
//!
//! Persisted viewport values are rounded through a fixed-point decimal string
//! and parsed back, so the stored value is the nearest `f64` to the printed
//! decimal. Exact ties round away from zero.

use core::cmp::Ordering;

// Enough fractional digits to print any finite f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Round `v` to `digits` decimal places.
///
/// The decision uses the exact binary value of `v`. When it lies exactly
/// halfway between two candidates the one further from zero wins.
/// Non-finite inputs are returned unchanged.
pub fn round_to_fixed(v: f64, digits: usize) -> f64 {
    if !v.is_finite() {
        return v;
    }
    if let Some(away) = round_exact_tie_away(v, digits) {
        return away;
    }
    // Not a tie: the formatter rounds to nearest from the exact value.
    format!("{v:.digits$}").parse::<f64>().unwrap_or(v)
}

fn round_exact_tie_away(v: f64, digits: usize) -> Option<f64> {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, v.abs());
    let dot = exact.find('.')?;
    let fraction = &exact.as_bytes()[dot + 1..];
    if fraction.get(digits) != Some(&b'5') || fraction[digits + 1..].iter().any(|&d| d != b'0') {
        return None;
    }

    let end = if digits == 0 { dot } else { dot + 1 + digits };
    let magnitude = increment_last_digit(&exact[..end]).parse::<f64>().ok()?;
    Some(magnitude.copysign(v))
}

/// Add one unit in the last place of a non-negative decimal string.
fn increment_last_digit(decimal: &str) -> String {
    let mut digits: Vec<char> = decimal.chars().collect();
    for i in (0..digits.len()).rev() {
        match digits[i] {
            '.' => continue,
            '9' => digits[i] = '0',
            d => {
                digits[i] = char::from(d as u8 + 1);
                return digits.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(digits).collect()
}

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}
