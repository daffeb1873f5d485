//! Common test utilities and data generators.

#![allow(dead_code)]

use moderation_lrt::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// `n` standard normal predictors and `n` standard normal noise draws.
pub fn normal_draws(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
    let eps: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
    (x, eps)
}

/// Alternating groups, so both are always present.
pub fn alternating_groups(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i % 2) as f64).collect()
}

/// Zip columns into observations.
pub fn observations(x: &[f64], y: &[f64], c: &[f64]) -> Vec<Observation> {
    x.iter()
        .zip(y)
        .zip(c)
        .map(|((&x, &y), &c)| Observation::new(x, y, c))
        .collect()
}

/// `y = x + 0.1·ε` with groups drawn as fair coin flips, independent of `y`.
pub fn null_with_random_groups(n: usize, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x: f64 = rng.sample(StandardNormal);
            let c = if rng.random_bool(0.5) { 1.0 } else { 0.0 };
            let eps: f64 = rng.sample(StandardNormal);
            Observation::new(x, x + 0.1 * eps, c)
        })
        .collect()
}

/// `y = x + 0.1·ε`, the same `(x, ε)` pairs repeated in both groups.
///
/// Each group then has the identical least-squares line, so the full model
/// cannot improve on the restricted one.
pub fn mirrored_null_data(half: usize, seed: u64) -> Vec<Observation> {
    let (x, eps) = normal_draws(half, seed);
    let mut obs = Vec::with_capacity(2 * half);
    for c in [0.0, 1.0] {
        for i in 0..half {
            obs.push(Observation::new(x[i], x[i] + 0.1 * eps[i], c));
        }
    }
    obs
}

/// Approximate equality check for floating point values.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
