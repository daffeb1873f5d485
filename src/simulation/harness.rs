//! Monte Carlo calibration of the moderation test.

use super::response::ResponseModel;
use super::summary::CalibrationSummary;
use crate::core::{CalibrationOptions, Observation};
use crate::inference::{LrTestResult, ModerationTest};
use crate::solvers::{OlsRegressor, RegressionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::{debug, info, warn};

/// Repeatedly simulates datasets from a response model and records how often
/// the likelihood-ratio test rejects.
///
/// Trial `i` draws from its own generator, seeded from the base seed and `i`
/// alone, so any trial can be replayed in isolation and trials can be run in
/// any order.
///
/// # Example
///
/// ```rust,ignore
/// use moderation_lrt::prelude::*;
///
/// let options = CalibrationOptions::builder().n_trials(1000).seed(1).build()?;
/// let harness = CalibrationHarness::new(options, LinearResponse::null(0.1))?;
/// let summary = harness.run();
/// println!("{summary}");
/// ```
#[derive(Debug, Clone)]
pub struct CalibrationHarness<M> {
    options: CalibrationOptions,
    model: M,
    test: ModerationTest,
}

impl<M: ResponseModel> CalibrationHarness<M> {
    /// Create a harness after validating `options`.
    pub fn new(options: CalibrationOptions, model: M) -> Result<Self, RegressionError> {
        options.validate()?;
        let regressor = OlsRegressor::builder()
            .rank_tolerance(options.rank_tolerance)
            .build();
        let test = ModerationTest::new(options.alpha).with_regressor(regressor);
        Ok(Self {
            options,
            model,
            test,
        })
    }

    pub fn options(&self) -> &CalibrationOptions {
        &self.options
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Seed of the generator used by trial `trial`.
    pub fn trial_seed(&self, trial: usize) -> u64 {
        mix_seed(self.options.seed, trial as u64)
    }

    /// Draw one dataset: `n` predictors, then `n` group labels, then `n`
    /// responses.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Observation> {
        let n = self.options.n_observations;
        // Responses get their own stream so closures can take a concrete StdRng
        let mut response_rng = StdRng::seed_from_u64(rng.random());

        let xs: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
        let cs: Vec<f64> = (0..n)
            .map(|_| {
                if rng.random_bool(self.options.group_probability) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        xs.into_iter()
            .zip(cs)
            .map(|(x, c)| Observation::new(x, self.model.draw(x, c, &mut response_rng), c))
            .collect()
    }

    /// Simulate and test trial `trial` alone.
    pub fn run_trial(&self, trial: usize) -> Result<LrTestResult, RegressionError> {
        self.run_seeded(self.trial_seed(trial))
    }

    fn run_seeded(&self, seed: u64) -> Result<LrTestResult, RegressionError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let observations = self.generate(&mut rng);
        Ok(self.test.run(&observations)?.test)
    }

    /// Run all trials with seeds derived from the configured base seed.
    pub fn run(&self) -> CalibrationSummary {
        let seeds = (0..self.options.n_trials).map(|t| self.trial_seed(t));
        self.aggregate(seeds)
    }

    /// Run all trials with seeds drawn from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> CalibrationSummary {
        let seeds: Vec<u64> = (0..self.options.n_trials).map(|_| rng.random()).collect();
        self.aggregate(seeds)
    }

    fn aggregate(&self, seeds: impl IntoIterator<Item = u64>) -> CalibrationSummary {
        let mut trials = 0;
        let mut rejections = 0;
        let mut skipped = 0;

        for (trial, seed) in seeds.into_iter().enumerate() {
            match self.run_seeded(seed) {
                Ok(result) => {
                    debug!(
                        trial,
                        statistic = result.statistic,
                        p_value = result.p_value,
                        "trial complete"
                    );
                    trials += 1;
                    if result.is_reject() {
                        rejections += 1;
                    }
                }
                Err(err) => {
                    warn!(trial, seed, error = %err, "skipping trial");
                    skipped += 1;
                }
            }
        }

        let summary = CalibrationSummary::new(trials, rejections, skipped, self.options.alpha);
        info!(
            trials = summary.trials,
            rejections = summary.rejections,
            skipped = summary.skipped,
            empirical_rate = summary.empirical_rate,
            "calibration run finished"
        );
        summary
    }
}

/// SplitMix64 finalizer over the base seed and the trial index.
fn mix_seed(seed: u64, trial: u64) -> u64 {
    let mut z = seed ^ trial.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
