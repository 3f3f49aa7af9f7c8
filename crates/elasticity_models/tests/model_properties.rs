//! Property and recovery tests for the model layer.
//!
//! Synthetic demand is generated from a known log-log relation with Gaussian
//! noise, then fitted back.

use approx::assert_relative_eq;
use elasticity_models::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// `(ln price, ln quantity)` pairs with `ln q = intercept + slope * ln p + noise`.
fn synthetic_log_demand(n: usize, slope: f64, noise_sd: f64, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, noise_sd).unwrap();
    let log_p: Vec<f64> = (0..n).map(|_| rng.gen_range(80.0f64..120.0).ln()).collect();
    let log_q: Vec<f64> = log_p
        .iter()
        .map(|lp| 10.0 + slope * lp + noise.sample(&mut rng))
        .collect();
    (log_p, log_q)
}

// ================================================================
// OLS recovery
// ================================================================

#[test]
fn test_ols_recovers_known_elasticity() {
    let (x, y) = synthetic_log_demand(365, -1.5, 0.05, 42);
    let fit = SimpleOls::fit(&x, &y).unwrap();

    assert!((fit.slope - (-1.5)).abs() < 0.225, "slope {}", fit.slope);
    assert!(fit.p_value < 0.01);

    let (lo, hi) = fit.slope_interval(0.95).unwrap();
    assert!(lo < fit.slope && fit.slope < hi);
    assert!(hi - lo < 0.3, "interval [{}, {}]", lo, hi);
}

#[test]
fn test_ols_interval_narrows_with_more_data() {
    let (x_small, y_small) = synthetic_log_demand(30, -0.8, 0.1, 7);
    let (x_large, y_large) = synthetic_log_demand(600, -0.8, 0.1, 7);

    let small = SimpleOls::fit(&x_small, &y_small).unwrap();
    let large = SimpleOls::fit(&x_large, &y_large).unwrap();
    assert!(large.standard_error < small.standard_error);
}

// ================================================================
// Boosting and cross-validation
// ================================================================

#[test]
fn test_boosted_numerical_derivative_tracks_slope() {
    let (log_p, log_q) = synthetic_log_demand(300, -1.2, 0.02, 11);
    let rows: Vec<Vec<f64>> = log_p.iter().map(|lp| vec![*lp]).collect();
    let x = FeatureMatrix::new(vec!["log_price".into()], rows).unwrap();

    let model = GradientBoostedRegressor::fit(&x, &log_q, &BoostingConfig::default()).unwrap();
    let centre = x.column_means()[0];
    // a wide step averages over the piecewise-constant fit
    let delta = 0.1;
    let slope = (model.predict(&[centre + delta]) - model.predict(&[centre])) / delta;
    assert!(slope < 0.0, "slope {}", slope);
    assert!((slope - (-1.2)).abs() < 0.6, "slope {}", slope);
}

#[test]
fn test_cross_validated_r2_is_high_for_clean_signal() {
    let (log_p, log_q) = synthetic_log_demand(200, -2.0, 0.01, 3);
    let rows: Vec<Vec<f64>> = log_p.iter().map(|lp| vec![*lp]).collect();
    let x = FeatureMatrix::new(vec!["log_price".into()], rows).unwrap();

    let score = cross_val_r2(&x, &log_q, &BoostingConfig::default(), 5).unwrap();
    assert!(score > 0.8, "score {}", score);
}

// ================================================================
// Bootstrap
// ================================================================

#[test]
fn test_bootstrap_interval_covers_ols_slope() {
    let (x, y) = synthetic_log_demand(120, -1.0, 0.1, 99);
    let slopes = bootstrap_statistic(x.len(), 100, &mut ResampleRng::from_seed(1), true, |idx| {
        let xs: Vec<f64> = idx.iter().map(|&i| x[i]).collect();
        let ys: Vec<f64> = idx.iter().map(|&i| y[i]).collect();
        SimpleOls::fit(&xs, &ys).map(|f| f.slope)
    })
    .unwrap();

    let (lo, hi) = percentile_interval(&slopes, 0.95).unwrap();
    let point = SimpleOls::fit(&x, &y).unwrap().slope;
    assert!(lo <= point && point <= hi);
}

// ================================================================
// Properties
// ================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ols_exact_on_noiseless_lines(
        slope in -5.0f64..5.0,
        intercept in -10.0f64..10.0,
        n in 3usize..50,
    ) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| intercept + slope * v).collect();
        let fit = SimpleOls::fit(&x, &y).unwrap();
        prop_assert!((fit.slope - slope).abs() < 1e-8);
        prop_assert!((fit.intercept - intercept).abs() < 1e-7);
    }

    #[test]
    fn prop_kfold_covers_every_row_once(n in 5usize..200, k in 2usize..6) {
        let kfold = KFold::new(n, k).unwrap();
        let mut seen = vec![0usize; n];
        for fold in kfold.folds() {
            for i in fold.clone() {
                seen[i] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
        let sizes: Vec<usize> = kfold.folds().iter().map(|f| f.len()).collect();
        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn prop_r2_of_perfect_prediction_is_one(values in prop::collection::vec(-100.0f64..100.0, 1..50)) {
        prop_assert_eq!(r2_score(&values, &values), 1.0);
    }
}

#[test]
fn test_tree_importances_sum_to_one_when_split() {
    let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (30 - i) as f64]).collect();
    let y: Vec<f64> = (0..30).map(|i| (i / 10) as f64).collect();
    let x = FeatureMatrix::new(vec!["a".into(), "b".into()], rows).unwrap();
    let tree = RegressionTree::fit(
        &x,
        &y,
        TreeParams {
            max_depth: 3,
            min_samples_split: 2,
            min_samples_leaf: 1,
        },
    )
    .unwrap();
    assert_relative_eq!(tree.feature_importances().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
}
