//! Non-parametric bootstrap.
//!
//! Replicate seeds are drawn sequentially from the master generator before
//! any replicate runs, so a seeded run produces the same statistics whether
//! replicates are evaluated in parallel or in order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use elasticity_core::math::stats;

use super::rng::ResampleRng;
use crate::ModelError;

/// Bootstrap a statistic over row indices.
///
/// `statistic` receives `n` row indices drawn with replacement and returns
/// the statistic of that resample.
///
/// # Errors
///
/// - `InsufficientData` when `n` is zero
/// - `InvalidParameter` when `iterations` is zero
/// - The first error returned by `statistic`
///
/// # Examples
///
/// ```
/// use elasticity_models::resampling::{bootstrap_statistic, ResampleRng};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let mut rng = ResampleRng::from_seed(42);
/// let means = bootstrap_statistic(data.len(), 200, &mut rng, false, |idx| {
///     Ok(idx.iter().map(|&i| data[i]).sum::<f64>() / idx.len() as f64)
/// })
/// .unwrap();
/// assert_eq!(means.len(), 200);
/// assert!(means.iter().all(|m| (1.0..=5.0).contains(m)));
/// ```
pub fn bootstrap_statistic<F>(
    n: usize,
    iterations: usize,
    rng: &mut ResampleRng,
    parallel: bool,
    statistic: F,
) -> Result<Vec<f64>, ModelError>
where
    F: Fn(&[usize]) -> Result<f64, ModelError> + Sync,
{
    if n == 0 {
        return Err(ModelError::insufficient_data(1, 0));
    }
    if iterations == 0 {
        return Err(ModelError::invalid_parameter("bootstrap needs at least 1 iteration"));
    }

    let seeds: Vec<u64> = (0..iterations).map(|_| rng.next_seed()).collect();
    let replicate = |seed: &u64| {
        let indices = ResampleRng::from_seed(*seed).sample_with_replacement(n);
        statistic(&indices)
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return seeds.par_iter().map(&replicate).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    seeds.iter().map(&replicate).collect()
}

/// Percentile interval over bootstrap replicates.
///
/// For `level = 0.95` this is the 2.5th and 97.5th percentile with linear
/// interpolation between order statistics.
///
/// # Errors
///
/// - `InsufficientData` for an empty replicate set
/// - `InvalidParameter` unless `0 < level < 1`
pub fn percentile_interval(replicates: &[f64], level: f64) -> Result<(f64, f64), ModelError> {
    if replicates.is_empty() {
        return Err(ModelError::insufficient_data(1, 0));
    }
    if !(level > 0.0 && level < 1.0) {
        return Err(ModelError::invalid_parameter(format!(
            "confidence level must be in (0, 1), got {}",
            level
        )));
    }
    let tail = (1.0 - level) / 2.0 * 100.0;
    let lower = stats::percentile(replicates, tail);
    let upper = stats::percentile(replicates, 100.0 - tail);
    match (lower, upper) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => Err(ModelError::invalid_parameter("percentile outside [0, 100]")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mean_of(data: &[f64]) -> impl Fn(&[usize]) -> Result<f64, ModelError> + Sync + '_ {
        move |idx| Ok(idx.iter().map(|&i| data[i]).sum::<f64>() / idx.len() as f64)
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let data: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let a = bootstrap_statistic(30, 50, &mut ResampleRng::from_seed(9), false, mean_of(&data))
            .unwrap();
        let b = bootstrap_statistic(30, 50, &mut ResampleRng::from_seed(9), false, mean_of(&data))
            .unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<f64> = (0..30).map(|i| (i * i) as f64).collect();
        let seq = bootstrap_statistic(30, 64, &mut ResampleRng::from_seed(5), false, mean_of(&data))
            .unwrap();
        let par = bootstrap_statistic(30, 64, &mut ResampleRng::from_seed(5), true, mean_of(&data))
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_statistic_error_propagates() {
        let result = bootstrap_statistic(5, 10, &mut ResampleRng::from_seed(1), false, |_| {
            Err(ModelError::ConstantRegressor)
        });
        assert_eq!(result.unwrap_err(), ModelError::ConstantRegressor);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        let mut rng = ResampleRng::from_seed(1);
        assert!(bootstrap_statistic(0, 10, &mut rng, false, |_| Ok(0.0)).is_err());
        assert!(bootstrap_statistic(5, 0, &mut rng, false, |_| Ok(0.0)).is_err());
    }

    #[test]
    fn test_percentile_interval_bounds() {
        let replicates: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let (lo, hi) = percentile_interval(&replicates, 0.95).unwrap();
        assert_relative_eq!(lo, 3.475, epsilon = 1e-9);
        assert_relative_eq!(hi, 97.525, epsilon = 1e-9);
        assert!(percentile_interval(&[], 0.95).is_err());
        assert!(percentile_interval(&replicates, 1.5).is_err());
    }
}
