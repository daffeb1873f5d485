//! One-shot moderation test on a single dataset.

use super::likelihood_ratio::{likelihood_ratio_test, LrTestResult};
use crate::core::{validate_alpha, DesignMatrices, FitResult, Observation};
use crate::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};

/// Both fits and the test statistic for one dataset.
#[derive(Debug, Clone)]
pub struct ModerationOutcome {
    /// Fit of `y ~ 1 + x`.
    pub restricted: FitResult,
    /// Fit of `y ~ 1 + x + c + x:c`.
    pub full: FitResult,
    pub test: LrTestResult,
}

/// Tests whether a binary group shifts the intercept or slope of `y` on `x`.
///
/// # Example
///
/// ```rust,ignore
/// use moderation_lrt::prelude::*;
///
/// let outcome = ModerationTest::new(0.05).run(&observations)?;
/// println!("{}", outcome.test);
/// ```
#[derive(Debug, Clone)]
pub struct ModerationTest {
    alpha: f64,
    regressor: OlsRegressor,
}

impl ModerationTest {
    /// Create a test at significance level `alpha` with a default OLS fitter.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            regressor: OlsRegressor::default(),
        }
    }

    /// Use a differently configured OLS fitter.
    pub fn with_regressor(mut self, regressor: OlsRegressor) -> Self {
        self.regressor = regressor;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Build the designs, fit both models and compare them.
    pub fn run(&self, observations: &[Observation]) -> Result<ModerationOutcome, RegressionError> {
        validate_alpha(self.alpha)?;
        let design = DesignMatrices::from_observations(observations)?;
        self.run_design(&design)
    }

    /// Fit both models on prebuilt designs and compare them.
    pub fn run_design(&self, design: &DesignMatrices) -> Result<ModerationOutcome, RegressionError> {
        let restricted = self
            .regressor
            .fit(&design.restricted, &design.response)?
            .into_result();
        let full = self
            .regressor
            .fit(&design.full, &design.response)?
            .into_result();

        let test = likelihood_ratio_test(&restricted, &full, self.alpha)?;

        Ok(ModerationOutcome {
            restricted,
            full,
            test,
        })
    }
}
