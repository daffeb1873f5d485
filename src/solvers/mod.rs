//! Least-squares solvers.

mod ols;
mod traits;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{FittedRegressor, RegressionError, Regressor};
