//! Calibration options and configuration.

use thiserror::Error;

/// Smallest sample that leaves residual degrees of freedom for the full model.
pub const MIN_OBSERVATIONS: usize = 5;

/// Configuration for a Monte Carlo calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationOptions {
    /// Observations drawn per trial (default: 100).
    pub n_observations: usize,
    /// Number of independent trials (default: 1000).
    pub n_trials: usize,
    /// Significance level of the likelihood-ratio test (default: 0.05).
    pub alpha: f64,
    /// Base seed; trial `i` derives its own generator from it (default: 0).
    pub seed: u64,
    /// Probability that an observation falls in group `c = 1` (default: 0.5).
    pub group_probability: f64,
    /// Relative rank tolerance handed to the OLS fitter (default: 1e-10).
    pub rank_tolerance: f64,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            n_observations: 100,
            n_trials: 1000,
            alpha: 0.05,
            seed: 0,
            group_probability: 0.5,
            rank_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("significance level must be in (0, 1), got {0}")]
    InvalidSignificanceLevel(f64),
    #[error("n_trials must be at least 1, got {0}")]
    InvalidTrialCount(usize),
    #[error("n_observations must be at least 5, got {0}")]
    InvalidSampleSize(usize),
    #[error("group_probability must be in (0, 1), got {0}")]
    InvalidGroupProbability(f64),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
}

/// Check a significance level without building a whole options struct.
pub fn validate_alpha(alpha: f64) -> Result<(), OptionsError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidSignificanceLevel(alpha))
    }
}

impl CalibrationOptions {
    /// Create a new builder for calibration options.
    pub fn builder() -> CalibrationOptionsBuilder {
        CalibrationOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_alpha(self.alpha)?;
        if self.n_trials < 1 {
            return Err(OptionsError::InvalidTrialCount(self.n_trials));
        }
        if self.n_observations < MIN_OBSERVATIONS {
            return Err(OptionsError::InvalidSampleSize(self.n_observations));
        }
        if !(self.group_probability > 0.0 && self.group_probability < 1.0) {
            return Err(OptionsError::InvalidGroupProbability(
                self.group_probability,
            ));
        }
        if !(self.rank_tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.rank_tolerance));
        }
        Ok(())
    }
}

/// Builder for `CalibrationOptions`.
#[derive(Debug, Clone, Default)]
pub struct CalibrationOptionsBuilder {
    options: CalibrationOptions,
}

impl CalibrationOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of observations drawn per trial.
    pub fn n_observations(mut self, n: usize) -> Self {
        self.options.n_observations = n;
        self
    }

    /// Set the number of trials.
    pub fn n_trials(mut self, trials: usize) -> Self {
        self.options.n_trials = trials;
        self
    }

    /// Set the significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.options.alpha = alpha;
        self
    }

    /// Set the base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = seed;
        self
    }

    /// Set the probability of drawing group `c = 1`.
    pub fn group_probability(mut self, p: f64) -> Self {
        self.options.group_probability = p;
        self
    }

    /// Set the rank tolerance for the QR rank check.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<CalibrationOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> CalibrationOptions {
        self.options
    }
}
