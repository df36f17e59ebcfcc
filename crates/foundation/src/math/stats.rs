use super::stable_total_cmp_f64;

/// Arithmetic mean. An empty slice averages to `NaN`.
pub fn calculate_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Smallest and largest finite values, ignoring `NaN`s and infinities.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(min, max), v| {
        let min = if stable_total_cmp_f64(v, min).is_lt() { v } else { min };
        let max = if stable_total_cmp_f64(v, max).is_gt() { v } else { max };
        (min, max)
    }))
}

#[cfg(test)]
mod tests {
    use super::{calculate_average, min_max};

    #[test]
    fn average_works() {
        assert_eq!(calculate_average(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 3.5);
        assert!(calculate_average(&[]).is_nan());
    }

    #[test]
    fn min_max_skips_non_finite() {
        assert_eq!(min_max(&[3.0, f64::NAN, -1.0, 8.0]), Some((-1.0, 8.0)));
        assert_eq!(min_max(&[f64::NAN]), None);
        assert_eq!(min_max(&[]), None);
    }
}
