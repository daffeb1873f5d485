//! Aggregated results of a calibration run.

use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

/// Rejection counts over the completed trials of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSummary {
    /// Trials that produced a test result.
    pub trials: usize,
    /// Trials whose test rejected the restricted model.
    pub rejections: usize,
    /// Trials dropped because the draw could not be fit (e.g. a single group).
    pub skipped: usize,
    /// `rejections / trials`; NaN when no trial completed.
    pub empirical_rate: f64,
    /// Significance level the tests were run at.
    pub nominal_alpha: f64,
}

impl CalibrationSummary {
    pub fn new(trials: usize, rejections: usize, skipped: usize, nominal_alpha: f64) -> Self {
        let empirical_rate = if trials > 0 {
            rejections as f64 / trials as f64
        } else {
            f64::NAN
        };
        Self {
            trials,
            rejections,
            skipped,
            empirical_rate,
            nominal_alpha,
        }
    }

    /// Binomial standard error of the empirical rate.
    pub fn standard_error(&self) -> f64 {
        let p = self.empirical_rate;
        (p * (1.0 - p) / self.trials as f64).sqrt()
    }

    /// Wilson score interval for the true rejection rate.
    pub fn confidence_interval(&self, confidence: f64) -> (f64, f64) {
        if self.trials == 0 {
            return (f64::NAN, f64::NAN);
        }
        let z = two_sided_z(confidence);
        let n = self.trials as f64;
        let p = self.empirical_rate;
        let z2 = z * z;

        let denom = 1.0 + z2 / n;
        let center = (p + z2 / (2.0 * n)) / denom;
        let half = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

        ((center - half).max(0.0), (center + half).min(1.0))
    }

    /// Whether the empirical rate lies inside the band a correctly calibrated
    /// test would produce with probability `confidence`.
    pub fn is_consistent_with_nominal(&self, confidence: f64) -> bool {
        if self.trials == 0 {
            return false;
        }
        let (lo, hi) = binomial_band(self.nominal_alpha, self.trials, confidence);
        (lo..=hi).contains(&self.empirical_rate)
    }
}

impl fmt::Display for CalibrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} rejections (rate {:.4}, nominal {}), {} skipped",
            self.rejections, self.trials, self.empirical_rate, self.nominal_alpha, self.skipped
        )
    }
}

/// Normal-approximation band for the rejection rate of `trials` independent
/// tests that each reject with probability `p`.
pub fn binomial_band(p: f64, trials: usize, confidence: f64) -> (f64, f64) {
    let z = two_sided_z(confidence);
    let half = z * (p * (1.0 - p) / trials as f64).sqrt();
    ((p - half).max(0.0), (p + half).min(1.0))
}

fn two_sided_z(confidence: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .ok()
        .map_or(f64::NAN, |d| d.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}
