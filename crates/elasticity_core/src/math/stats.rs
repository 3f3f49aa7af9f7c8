//! Descriptive statistics over `f64` slices.
//!
//! Empty inputs yield `None` instead of `NaN` so callers are forced to decide
//! what an empty history means for them.

use statrs::statistics::Statistics;

/// Arithmetic mean, `None` for an empty slice.
///
/// # Examples
/// ```
/// use elasticity_core::math::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Sample variance (n - 1 denominator), `None` below two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().variance())
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is in percent (`0..=100`). Matches the default "linear" method of
/// common numerical libraries: the rank is `q / 100 * (n - 1)`.
///
/// # Examples
/// ```
/// use elasticity_core::math::stats::percentile;
///
/// let data = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&data, 50.0), Some(2.5));
/// assert_eq!(percentile(&data, 0.0), Some(1.0));
/// assert_eq!(percentile(&data, 100.0), Some(4.0));
/// ```
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
}

/// `count` evenly spaced values over `[start, end]`, both ends included.
///
/// # Examples
/// ```
/// use elasticity_core::math::stats::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Percentage change from `base` to `value`, `None` when the base is zero or not finite.
///
/// # Examples
/// ```
/// use elasticity_core::math::stats::percent_change;
///
/// let change = percent_change(80.0, 100.0).unwrap();
/// assert!((change - 25.0).abs() < 1e-12);
/// assert_eq!(percent_change(0.0, 5.0), None);
/// ```
pub fn percent_change(base: f64, value: f64) -> Option<f64> {
    if base == 0.0 || !base.is_finite() {
        return None;
    }
    Some((value - base) / base * 100.0)
}
