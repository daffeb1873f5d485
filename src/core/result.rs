//! Fit result structures.

use faer::Col;

/// Result of one least-squares fit.
///
/// Everything the likelihood-ratio test needs follows from `rss` and
/// `n_observations`: the Gaussian error variance is profiled out at its
/// maximum-likelihood value `rss / n`.
#[derive(Debug, Clone)]
pub struct FitResult {
    // ========== Core Results ==========
    /// Estimated coefficients, one per design matrix column (intercept first).
    pub coefficients: Col<f64>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    /// Residual sum of squares.
    pub rss: f64,

    // ========== Dimensions ==========
    /// Number of observations (rows of the design matrix).
    pub n_observations: usize,

    /// Number of predictor columns, intercept included.
    pub n_predictors: usize,

    /// Numerical rank of the design matrix.
    pub rank: usize,

    /// Tolerance used for rank determination.
    pub rank_tolerance: f64,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Maximum-likelihood error variance (rss / n).
    pub sigma2_mle: f64,

    /// Maximized Gaussian log-likelihood.
    pub log_likelihood: f64,

    /// Akaike Information Criterion (variance counted as a parameter).
    pub aic: f64,

    /// Bayesian Information Criterion (variance counted as a parameter).
    pub bic: f64,
}

impl FitResult {
    /// Assemble a result from the pieces a solver produces.
    pub(crate) fn from_fit(
        coefficients: Col<f64>,
        fitted_values: Col<f64>,
        residuals: Col<f64>,
        y: &Col<f64>,
        rank: usize,
        rank_tolerance: f64,
    ) -> Self {
        let n = residuals.nrows();
        let k = coefficients.nrows();

        let rss: f64 = residuals.iter().map(|&r| r * r).sum();

        let y_mean = y.iter().sum::<f64>() / n as f64;
        let tss: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        let r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let sigma2_mle = rss / n as f64;
        let log_likelihood = gaussian_log_likelihood(n, rss);

        // +1 for the error variance
        let n_params = (k + 1) as f64;
        let aic = 2.0 * n_params - 2.0 * log_likelihood;
        let bic = n_params * (n as f64).ln() - 2.0 * log_likelihood;

        Self {
            coefficients,
            residuals,
            fitted_values,
            rss,
            n_observations: n,
            n_predictors: k,
            rank,
            rank_tolerance,
            r_squared,
            sigma2_mle,
            log_likelihood,
            aic,
            bic,
        }
    }

    /// Residual degrees of freedom (n - k).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_predictors)
    }

    /// Check if the fit interpolates the data exactly.
    pub fn is_exact_fit(&self) -> bool {
        self.rss == 0.0
    }
}

/// Maximized log-likelihood of a linear model with i.i.d. Gaussian errors.
///
/// ℓ = −(n/2)·(ln 2π + ln(rss/n) + 1). Returns `+∞` for a perfect fit.
pub fn gaussian_log_likelihood(n: usize, rss: f64) -> f64 {
    let n = n as f64;
    if rss <= 0.0 {
        return f64::INFINITY;
    }
    -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (rss / n).ln() + 1.0)
}
