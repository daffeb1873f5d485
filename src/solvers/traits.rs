//! Core traits for regression estimators.

use crate::core::FitResult;
use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur while building designs, fitting models or testing them.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("invalid category at observation {index}: expected 0 or 1, got {value}")]
    InvalidCategory { index: usize, value: f64 },

    #[error("non-finite value at observation {index}")]
    NonFiniteValue { index: usize },

    #[error("design matrix is rank deficient: rank {rank} of {n_columns} columns")]
    RankDeficient { rank: usize, n_columns: usize },

    #[error("models are not nested on the same data: {0}")]
    ModelMismatch(String),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] crate::core::OptionsError),
}

/// A regression estimator that can be fit to data.
///
/// Fitting returns a separate fitted model, so one configured estimator can be
/// reused across many datasets (the calibration harness fits two per trial).
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Design matrix of shape (n_samples, n_columns), intercept included
    /// * `y` - Target vector of length n_samples
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model.
pub trait FittedRegressor {
    /// Predict responses for rows laid out like the training design matrix.
    ///
    /// Panics if `x` does not have one column per coefficient.
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;

    /// Access the fit result (coefficients, RSS, log-likelihood, ...).
    fn result(&self) -> &FitResult;

    /// Get the coefficients (convenience method).
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }

    /// Residual sum of squares (convenience method).
    fn rss(&self) -> f64 {
        self.result().rss
    }

    /// Maximized Gaussian log-likelihood (convenience method).
    fn log_likelihood(&self) -> f64 {
        self.result().log_likelihood
    }

    /// Consume the fitted model, keeping only its result.
    fn into_result(self) -> FitResult;
}
