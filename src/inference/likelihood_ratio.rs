//! Likelihood-ratio test between two nested Gaussian linear models.

use crate::core::{validate_alpha, FitResult};
use crate::solvers::RegressionError;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt;
use tracing::debug;

/// Outcome of a hypothesis test at a fixed significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The restricted model is rejected in favour of the full model.
    Reject,
    /// The data are compatible with the restricted model.
    FailToReject,
}

impl Decision {
    pub fn is_reject(self) -> bool {
        matches!(self, Decision::Reject)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Reject => write!(f, "reject"),
            Decision::FailToReject => write!(f, "fail to reject"),
        }
    }
}

/// Result of a likelihood-ratio test.
#[derive(Debug, Clone, PartialEq)]
pub struct LrTestResult {
    /// −2·log Λ, never negative.
    pub statistic: f64,
    /// Difference in parameter count between the full and restricted model.
    pub df_diff: usize,
    /// Upper-tail χ² probability of `statistic`.
    pub p_value: f64,
    /// Significance level the decision was taken at.
    pub alpha: f64,
    pub decision: Decision,
    /// Observations both models were fit on.
    pub n_observations: usize,
    pub log_likelihood_restricted: f64,
    pub log_likelihood_full: f64,
}

impl LrTestResult {
    pub fn is_reject(&self) -> bool {
        self.decision.is_reject()
    }
}

impl fmt::Display for LrTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LR = {:.4}, df = {}, p = {:.4e} ({} at alpha = {})",
            self.statistic, self.df_diff, self.p_value, self.decision, self.alpha
        )
    }
}

/// Likelihood-ratio statistic from the residual sums of squares of two nested
/// fits on `n` observations: `n · ln(rss_restricted / rss_full)`.
///
/// Negative values from rounding are clamped to zero. A perfect full fit
/// against an imperfect restricted fit gives `+∞`.
pub fn lr_statistic(n: usize, rss_restricted: f64, rss_full: f64) -> f64 {
    if rss_full <= 0.0 {
        return if rss_restricted <= 0.0 {
            0.0
        } else {
            f64::INFINITY
        };
    }
    let statistic = n as f64 * (rss_restricted / rss_full).ln();
    statistic.max(0.0)
}

/// Upper-tail probability of a χ² distribution with `df` degrees of freedom.
pub fn chi_squared_sf(statistic: f64, df: usize) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }
    if statistic == f64::INFINITY {
        return 0.0;
    }
    if statistic <= 0.0 {
        return 1.0;
    }
    ChiSquared::new(df as f64)
        .ok()
        .map_or(f64::NAN, |d| d.sf(statistic).clamp(0.0, 1.0))
}

/// Likelihood-ratio test of a restricted model against a full model that
/// nests it, both fit by OLS on the same observations.
///
/// By Wilks' theorem the statistic is asymptotically χ² with `df_diff`
/// degrees of freedom under the restricted model. For small samples the
/// p-value is only approximate.
///
/// # Errors
/// * `ModelMismatch` if the fits use different observation counts or the full
///   model does not have strictly more predictors.
/// * `InvalidOptions` if `alpha` is not in (0, 1).
pub fn likelihood_ratio_test(
    restricted: &FitResult,
    full: &FitResult,
    alpha: f64,
) -> Result<LrTestResult, RegressionError> {
    validate_alpha(alpha)?;

    if restricted.n_observations != full.n_observations {
        return Err(RegressionError::ModelMismatch(format!(
            "restricted model has {} observations, full model has {}",
            restricted.n_observations, full.n_observations
        )));
    }
    if full.n_predictors <= restricted.n_predictors {
        return Err(RegressionError::ModelMismatch(format!(
            "full model must have more predictors than the restricted one ({} <= {})",
            full.n_predictors, restricted.n_predictors
        )));
    }

    let n = full.n_observations;
    let df_diff = full.n_predictors - restricted.n_predictors;

    let statistic = lr_statistic(n, restricted.rss, full.rss);
    let p_value = chi_squared_sf(statistic, df_diff);

    let decision = if p_value < alpha {
        Decision::Reject
    } else {
        Decision::FailToReject
    };

    debug!(statistic, df_diff, p_value, %decision, "likelihood-ratio test");

    Ok(LrTestResult {
        statistic,
        df_diff,
        p_value,
        alpha,
        decision,
        n_observations: n,
        log_likelihood_restricted: restricted.log_likelihood,
        log_likelihood_full: full.log_likelihood,
    })
}
