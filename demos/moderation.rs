//! # Moderation by a Binary Group
//!
//! Does a group indicator `c` change how `y` depends on `x`? The restricted
//! model `y ~ 1 + x` is compared with the full model `y ~ 1 + x + c + x:c`
//! by a likelihood-ratio test with a χ²(2) reference distribution.
//!
//! ## When to Use
//! - Continuous response, continuous predictor, two groups
//! - Gaussian errors with a common variance across groups
//! - Enough observations for the χ² approximation (tens per group)
//!
//! Run with: `cargo run --example moderation`

use moderation_lrt::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

fn main() {
    println!("=== Likelihood-Ratio Test for Moderation ===\n");

    no_moderation();
    group_shift();
    calibration();
    power_curve();
}

fn draw(n: usize, seed: u64, group_effect: f64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let x: f64 = rng.sample(StandardNormal);
            let eps: f64 = rng.sample(StandardNormal);
            let c = (i % 2) as f64;
            Observation::new(x, x + group_effect * c + 0.1 * eps, c)
        })
        .collect()
}

/// The group has no effect on the response
fn no_moderation() {
    println!("--- Scenario A: y = x + 0.1e ---\n");

    let outcome = ModerationTest::new(0.05)
        .run(&draw(100, 42, 0.0))
        .expect("test should run");

    println!("RSS restricted: {:.4}", outcome.restricted.rss);
    println!("RSS full:       {:.4}", outcome.full.rss);
    println!("{}", outcome.test);
    println!();
}

/// Group 1 sits one unit above group 0
fn group_shift() {
    println!("--- Scenario B: y = x + c + 0.1e ---\n");

    let outcome = ModerationTest::new(0.05)
        .run(&draw(100, 42, 1.0))
        .expect("test should run");

    let beta = &outcome.full.coefficients;
    println!(
        "Full model: y = {:.3} + {:.3}*x + {:.3}*c + {:.3}*x*c",
        beta[0], beta[1], beta[2], beta[3]
    );
    println!("{}", outcome.test);
    println!();
}

/// Empirical size under the null
fn calibration() {
    println!("--- Calibration: 1000 trials, n = 100, alpha = 0.05 ---\n");

    let options = CalibrationOptions::builder()
        .n_observations(100)
        .n_trials(1000)
        .alpha(0.05)
        .seed(2024)
        .build()
        .expect("valid options");
    let harness =
        CalibrationHarness::new(options, LinearResponse::null(0.1)).expect("valid harness");

    let summary = harness.run();
    let (lo, hi) = summary.confidence_interval(0.95);

    println!("{summary}");
    println!("95% interval for the true size: [{lo:.4}, {hi:.4}]");
    println!(
        "Consistent with nominal level: {}",
        summary.is_consistent_with_nominal(0.99)
    );
    println!();
}

/// Rejection rate as the interaction grows
fn power_curve() {
    println!("--- Power against an interaction ---\n");
    println!("{:>12} {:>10}", "interaction", "power");

    for interaction in [0.0, 0.01, 0.02, 0.03, 0.05] {
        let options = CalibrationOptions::builder()
            .n_observations(100)
            .n_trials(300)
            .seed(7)
            .build()
            .expect("valid options");
        let model = LinearResponse::null(0.1).interaction(interaction);
        let summary = CalibrationHarness::new(options, model)
            .expect("valid harness")
            .run();

        println!("{:>12.2} {:>10.3}", interaction, summary.empirical_rate);
    }
}
