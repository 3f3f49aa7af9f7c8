//! Criterion benchmarks for elasticity estimation and scenario simulation.
//!
//! Measures the linear and boosted estimators across history lengths, and
//! a single scenario projection against a fixed estimate.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{DateWindow, ModelKind, Product, SaleObservation};
use elasticity_engine::config::EstimatorConfig;
use elasticity_engine::config::RecommenderConfig;
use elasticity_engine::scenarios::{PricingContext, ScenarioSimulator};
use elasticity_engine::ElasticityEstimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

/// Generate `n` days of noisy constant-elasticity demand.
fn generate_history(n: i64) -> SalesDataset {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.1).unwrap();
    SalesDataset::new(
        (0..n)
            .map(|i| {
                let price: f64 = rng.gen_range(60.0..140.0);
                let quantity = (1.0e5 * price.powf(-1.4)) * noise.sample(&mut rng).exp();
                SaleObservation::new(end_date() - Duration::days(i), price, quantity, 45.0)
                    .with_promotion(i % 14 == 0)
            })
            .collect(),
    )
}

fn product() -> Product {
    Product::new(1, "Bench Product", 100.0, 45.0)
}

/// Benchmark the closed-form linear estimator.
fn bench_linear_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_estimation");
    let estimator = ElasticityEstimator::default();
    let product = product();

    for size in [100, 1000, 10000] {
        let history = generate_history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &history, |b, history| {
            b.iter(|| {
                estimator
                    .estimate(
                        black_box(&product),
                        black_box(history),
                        ModelKind::Linear,
                        &DateWindow::unbounded(),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark the boosted estimator including CV and bootstrap.
fn bench_boosted_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("boosted_estimation");
    group.sample_size(10);
    let product = product();

    for iterations in [20, 100] {
        let config = EstimatorConfig::builder()
            .seed(7)
            .bootstrap_iterations(iterations)
            .build();
        let estimator = ElasticityEstimator::new(config, RecommenderConfig::default());
        let history = generate_history(365);

        group.bench_with_input(
            BenchmarkId::new("bootstrap", iterations),
            &history,
            |b, history| {
                b.iter(|| {
                    estimator
                        .estimate(
                            black_box(&product),
                            black_box(history),
                            ModelKind::GradientBoosted,
                            &DateWindow::unbounded(),
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark one scenario projection.
fn bench_scenario(c: &mut Criterion) {
    let product = product();
    let history = generate_history(365);
    let estimate = ElasticityEstimator::default()
        .estimate(&product, &history, ModelKind::Linear, &DateWindow::unbounded())
        .unwrap();
    let simulator = ScenarioSimulator::default();
    let ctx = PricingContext {
        product: &product,
        estimate: &estimate,
        history: &history,
        as_of: end_date(),
    };

    c.bench_function("simulate_scenario", |b| {
        b.iter(|| simulator.simulate(black_box(&ctx), black_box(92.0), 30).unwrap());
    });
}

criterion_group!(
    benches,
    bench_linear_estimation,
    bench_boosted_estimation,
    bench_scenario
);
criterion_main!(benches);
