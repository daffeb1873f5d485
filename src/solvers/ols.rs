//! Ordinary Least Squares solver.

use crate::core::FitResult;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use faer::{Col, Mat};
use tracing::debug;

/// Ordinary Least Squares regression estimator.
///
/// The design matrix is used as given: include a column of ones for an
/// intercept. Unlike a general-purpose regression routine, collinear columns
/// are not silently dropped. A design without full column rank is an error,
/// because the likelihood-ratio test needs both models to have exactly the
/// parameter count their design advertises.
///
/// # Example
///
/// ```rust,ignore
/// use moderation_lrt::solvers::{FittedRegressor, OlsRegressor, Regressor};
/// use faer::{Col, Mat};
///
/// let x = Mat::from_fn(10, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
/// let y = Col::from_fn(10, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder().build().fit(&x, &y)?;
/// println!("beta = {:?}, rss = {}", fitted.coefficients(), fitted.rss());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    rank_tolerance: f64,
}

impl Default for OlsRegressor {
    fn default() -> Self {
        Self {
            rank_tolerance: 1e-10,
        }
    }
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given relative rank tolerance.
    pub fn new(rank_tolerance: f64) -> Self {
        Self { rank_tolerance }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Relative tolerance used by the rank check.
    pub fn rank_tolerance(&self) -> f64 {
        self.rank_tolerance
    }

    /// Numerical rank of `x` from the diagonal of a column-pivoted QR.
    ///
    /// Pivoting sorts |R_ii| in decreasing order, so a diagonal entry counts
    /// towards the rank while it exceeds `tolerance · |R_00|`.
    pub fn numerical_rank(x: &Mat<f64>, tolerance: f64) -> usize {
        let n_diag = x.ncols().min(x.nrows());
        if n_diag == 0 {
            return 0;
        }

        let qr = x.col_piv_qr();
        let r = qr.R();

        let scale = r[(0, 0)].abs();
        if scale == 0.0 {
            return 0;
        }

        let mut rank = 0;
        for i in 0..n_diag {
            if r[(i, i)].abs() > tolerance * scale {
                rank += 1;
            } else {
                break;
            }
        }
        rank
    }

    /// Check if a matrix has full column rank.
    pub fn is_full_rank(x: &Mat<f64>, tolerance: f64) -> bool {
        Self::numerical_rank(x, tolerance) == x.ncols()
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_columns = x.ncols();

        // Validate dimensions
        if n_samples != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n_samples,
                y_len: y.nrows(),
            });
        }

        // n == k is allowed: an exact fit with zero residual df
        if n_columns == 0 || n_samples < n_columns {
            return Err(RegressionError::InsufficientObservations {
                needed: n_columns.max(1),
                got: n_samples,
            });
        }

        let rank = Self::numerical_rank(x, self.rank_tolerance);
        if rank < n_columns {
            debug!(rank, n_columns, "rejecting rank-deficient design");
            return Err(RegressionError::RankDeficient { rank, n_columns });
        }

        let coefficients = self.solve_with_qr(x, y);

        // Compute fitted values and residuals
        let fitted_values = x * &coefficients;
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        let result = FitResult::from_fit(
            coefficients,
            fitted_values,
            residuals,
            y,
            rank,
            self.rank_tolerance,
        );

        Ok(FittedOls { result })
    }
}

impl OlsRegressor {
    /// Solve the least squares problem for a full-rank `x`.
    ///
    /// With `X = QR`, the coefficients solve `Rβ = Q'y`, which only needs
    /// the first `k` entries of `Q'y` and a back-substitution against `R`.
    fn solve_with_qr(&self, x: &Mat<f64>, y: &Col<f64>) -> Col<f64> {
        let n_columns = x.ncols();

        let qr = x.qr();
        let q = qr.compute_Q();
        let r = qr.R();

        let qty = q.transpose() * y;

        // Back-substitution for upper triangular system
        let mut beta = Col::zeros(n_columns);
        for i in (0..n_columns).rev() {
            let mut sum = qty[i];
            for j in (i + 1)..n_columns {
                sum -= r[(i, j)] * beta[j];
            }
            beta[i] = sum / r[(i, i)];
        }

        beta
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    result: FitResult,
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let n_samples = x.nrows();
        let n_columns = self.result.coefficients.nrows();
        assert_eq!(
            x.ncols(),
            n_columns,
            "design has {} columns but the model has {} coefficients",
            x.ncols(),
            n_columns
        );
        let mut predictions = Col::zeros(n_samples);

        for i in 0..n_samples {
            let mut pred = 0.0;
            for j in 0..n_columns {
                pred += x[(i, j)] * self.result.coefficients[j];
            }
            predictions[i] = pred;
        }

        predictions
    }

    fn result(&self) -> &FitResult {
        &self.result
    }

    fn into_result(self) -> FitResult {
        self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone)]
pub struct OlsRegressorBuilder {
    rank_tolerance: f64,
}

impl Default for OlsRegressorBuilder {
    fn default() -> Self {
        Self {
            rank_tolerance: OlsRegressor::default().rank_tolerance,
        }
    }
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative rank tolerance for the QR rank check.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.rank_tolerance = tol;
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.rank_tolerance)
    }
}
