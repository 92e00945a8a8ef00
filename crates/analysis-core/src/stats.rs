//! Small numeric helpers shared by the ratio and summary engines.
//!
//! Every helper treats `None` as "undefined" and never yields NaN or infinity.

use crate::Ratio;

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Divide two optional line items.
///
/// Undefined when either side is missing, the denominator is exactly zero,
/// or the quotient is not finite.
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Ratio {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    let q = n / d;
    q.is_finite().then_some(q)
}

/// Defined, finite values among the last `window` cells.
pub fn trailing_defined(values: &[Option<f64>], window: usize) -> Vec<f64> {
    let start = values.len().saturating_sub(window);
    values[start..]
        .iter()
        .filter_map(|v| v.filter(|x| x.is_finite()))
        .collect()
}

/// Mean of the defined values among the last `window` cells.
/// `None` when the window holds no defined value.
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Option<f64> {
    let defined = trailing_defined(values, window);
    if defined.is_empty() {
        None
    } else {
        Some(mean(&defined))
    }
}

/// Last minus first defined value in the trailing `window`.
/// `None` when fewer than two defined values remain.
pub fn window_delta(values: &[Option<f64>], window: usize) -> Option<f64> {
    let defined = trailing_defined(values, window);
    match (defined.first(), defined.last()) {
        (Some(first), Some(last)) if defined.len() >= 2 => Some(last - first),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_div() {
        assert_relative_eq!(safe_div(Some(40.0), Some(100.0)).unwrap(), 0.4);
        assert_eq!(safe_div(Some(1.0), Some(0.0)), None);
        assert_eq!(safe_div(Some(0.0), Some(0.0)), None);
        assert_eq!(safe_div(None, Some(2.0)), None);
        assert_eq!(safe_div(Some(2.0), None), None);
        assert_eq!(safe_div(Some(f64::MAX), Some(f64::MIN_POSITIVE)), None);
    }

    #[test]
    fn test_trailing_mean_skips_undefined() {
        let values = vec![Some(100.0), Some(0.2), None, Some(0.0)];
        assert_relative_eq!(trailing_mean(&values, 3).unwrap(), 0.1);
        assert_eq!(trailing_mean(&[None, None], 30), None);
        assert_eq!(trailing_mean(&[], 30), None);
    }

    #[test]
    fn test_window_delta() {
        let values = vec![Some(0.5), Some(0.10), Some(0.11), Some(0.13)];
        assert_relative_eq!(window_delta(&values, 3).unwrap(), 0.03, epsilon = 1e-12);
        assert_relative_eq!(window_delta(&values, 4).unwrap(), -0.37, epsilon = 1e-12);
        assert_eq!(window_delta(&[Some(0.3)], 4), None);
        assert_eq!(window_delta(&[Some(0.3), None], 4), None);
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
