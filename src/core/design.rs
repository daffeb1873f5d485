//! Design matrices for the moderation comparison.
//!
//! Two nested models are fit on the same rows:
//!
//! * restricted: `y ~ 1 + x`
//! * full: `y ~ 1 + x + c + x:c`
//!
//! where `c` is a binary group indicator.

use super::options::MIN_OBSERVATIONS;
use crate::solvers::RegressionError;
use faer::{Col, Mat};

/// Column count of the restricted design (`[1, x]`).
pub const RESTRICTED_COLUMNS: usize = 2;

/// Column count of the full design (`[1, x, c, x·c]`).
pub const FULL_COLUMNS: usize = 4;

/// One observation: continuous predictor, continuous response, group label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    /// Group indicator; must be exactly 0 or 1.
    pub c: f64,
}

impl Observation {
    pub fn new(x: f64, y: f64, c: f64) -> Self {
        Self { x, y, c }
    }
}

/// Restricted and full design matrices plus the shared response vector.
///
/// Row `i` of both matrices and element `i` of `response` all describe the
/// same observation.
#[derive(Debug, Clone)]
pub struct DesignMatrices {
    /// n×2 matrix with columns `[1, x]`.
    pub restricted: Mat<f64>,
    /// n×4 matrix with columns `[1, x, c, x·c]`.
    pub full: Mat<f64>,
    /// Response vector of length n.
    pub response: Col<f64>,
}

impl DesignMatrices {
    /// Build both designs from a slice of observations, keeping their order.
    pub fn from_observations(observations: &[Observation]) -> Result<Self, RegressionError> {
        let n = observations.len();
        let x = Col::from_fn(n, |i| observations[i].x);
        let y = Col::from_fn(n, |i| observations[i].y);
        let c = Col::from_fn(n, |i| observations[i].c);
        Self::from_columns(&x, &y, &c)
    }

    /// Build both designs from parallel columns.
    pub fn from_columns(
        x: &Col<f64>,
        y: &Col<f64>,
        c: &Col<f64>,
    ) -> Result<Self, RegressionError> {
        let n = x.nrows();

        if y.nrows() != n {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n,
                y_len: y.nrows(),
            });
        }
        if c.nrows() != n {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n,
                y_len: c.nrows(),
            });
        }

        // Strictly more rows than full-model columns
        if n < MIN_OBSERVATIONS {
            return Err(RegressionError::InsufficientObservations {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        }

        for i in 0..n {
            let ci = c[i];
            if ci != 0.0 && ci != 1.0 {
                return Err(RegressionError::InvalidCategory {
                    index: i,
                    value: ci,
                });
            }
            if !x[i].is_finite() || !y[i].is_finite() {
                return Err(RegressionError::NonFiniteValue { index: i });
            }
        }

        let restricted = Mat::from_fn(n, RESTRICTED_COLUMNS, |i, j| match j {
            0 => 1.0,
            _ => x[i],
        });

        let full = Mat::from_fn(n, FULL_COLUMNS, |i, j| match j {
            0 => 1.0,
            1 => x[i],
            2 => c[i],
            _ => x[i] * c[i],
        });

        Ok(Self {
            restricted,
            full,
            response: y.clone(),
        })
    }

    /// Number of observations (rows).
    pub fn n_observations(&self) -> usize {
        self.response.nrows()
    }

    /// Number of observations in group `c = 1`.
    pub fn group_size(&self) -> usize {
        (0..self.full.nrows())
            .filter(|&i| self.full[(i, 2)] == 1.0)
            .count()
    }
}
