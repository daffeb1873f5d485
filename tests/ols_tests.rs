//! OLS fitter tests.

mod common;

use approx::assert_relative_eq;
use faer::{Col, Mat};
use moderation_lrt::core::{gaussian_log_likelihood, DesignMatrices};
use moderation_lrt::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};

// ============================================================================
// Basic Regression Tests
// ============================================================================

#[test]
fn test_simple_linear_regression() {
    // y = 2 + 3*x
    let x = Mat::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
    let y = Col::from_fn(5, |i| 2.0 + 3.0 * i as f64);

    let fitted = OlsRegressor::builder()
        .build()
        .fit(&x, &y)
        .expect("fit should succeed");

    assert_relative_eq!(fitted.coefficients()[0], 2.0, epsilon = 1e-10);
    assert_relative_eq!(fitted.coefficients()[1], 3.0, epsilon = 1e-10);
    assert_relative_eq!(fitted.result().r_squared, 1.0, epsilon = 1e-10);
    assert!(fitted.rss() < 1e-18);
}

#[test]
fn test_full_design_recovers_group_lines() {
    // Group 0: y = 1 + 2x, group 1: y = 4 - x
    let n = 12;
    let x = Col::from_fn(n, |i| (i / 2) as f64);
    let c = Col::from_fn(n, |i| (i % 2) as f64);
    let y = Col::from_fn(n, |i| if c[i] == 0.0 { 1.0 + 2.0 * x[i] } else { 4.0 - x[i] });

    let design = DesignMatrices::from_columns(&x, &y, &c).unwrap();
    let fitted = OlsRegressor::default()
        .fit(&design.full, &design.response)
        .expect("fit should succeed");

    let beta = fitted.coefficients();
    assert_relative_eq!(beta[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(beta[1], 2.0, epsilon = 1e-9);
    assert_relative_eq!(beta[2], 3.0, epsilon = 1e-9);
    assert_relative_eq!(beta[3], -3.0, epsilon = 1e-9);
    assert_eq!(fitted.result().residual_df(), n - 4);
}

#[test]
fn test_residuals_orthogonal_to_columns() {
    for seed in [1_u64, 2, 3] {
        let (x, eps) = common::normal_draws(100, seed);
        let c = common::alternating_groups(100);
        let y: Vec<f64> = x
            .iter()
            .zip(&eps)
            .zip(&c)
            .map(|((&x, &e), &c)| 0.5 + x - 0.3 * c + 0.2 * x * c + e)
            .collect();
        let design =
            DesignMatrices::from_observations(&common::observations(&x, &y, &c)).unwrap();

        for matrix in [&design.restricted, &design.full] {
            let fitted = OlsRegressor::default()
                .fit(matrix, &design.response)
                .unwrap();
            let residuals = &fitted.result().residuals;

            for j in 0..matrix.ncols() {
                let dot: f64 = (0..matrix.nrows())
                    .map(|i| residuals[i] * matrix[(i, j)])
                    .sum();
                assert!(dot.abs() < 1e-9, "column {j}: residual dot = {dot}");
            }
        }
    }
}

#[test]
fn test_rss_and_log_likelihood() {
    let (x, eps) = common::normal_draws(60, 9);
    let c = common::alternating_groups(60);
    let y: Vec<f64> = x.iter().zip(&eps).map(|(&x, &e)| x + 0.1 * e).collect();
    let design = DesignMatrices::from_observations(&common::observations(&x, &y, &c)).unwrap();

    let fitted = OlsRegressor::default()
        .fit(&design.restricted, &design.response)
        .unwrap();
    let result = fitted.result();

    let rss: f64 = result.residuals.iter().map(|r| r * r).sum();
    assert_relative_eq!(result.rss, rss, max_relative = 1e-12);
    assert_relative_eq!(result.sigma2_mle, rss / 60.0, max_relative = 1e-12);
    assert_relative_eq!(
        result.log_likelihood,
        gaussian_log_likelihood(60, rss),
        max_relative = 1e-12
    );

    for i in 0..60 {
        assert_relative_eq!(
            result.fitted_values[i] + result.residuals[i],
            design.response[i],
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_predict_matches_fitted_values() {
    let (x, eps) = common::normal_draws(30, 4);
    let c = common::alternating_groups(30);
    let y: Vec<f64> = x.iter().zip(&eps).map(|(&x, &e)| 2.0 * x + e).collect();
    let design = DesignMatrices::from_observations(&common::observations(&x, &y, &c)).unwrap();

    let fitted = OlsRegressor::default()
        .fit(&design.full, &design.response)
        .unwrap();
    let preds = fitted.predict(&design.full);

    for i in 0..30 {
        assert_relative_eq!(preds[i], fitted.result().fitted_values[i], epsilon = 1e-10);
    }
}

#[test]
fn test_exact_fit_with_square_design() {
    let x = Mat::from_fn(3, 3, |i, j| ((i + 1) as f64).powi(j as i32));
    let y = Col::from_fn(3, |i| (i * i) as f64 + 1.0);

    let fitted = OlsRegressor::default().fit(&x, &y).unwrap();

    assert_eq!(fitted.result().residual_df(), 0);
    assert!(fitted.rss() < 1e-18);
}

// ============================================================================
// Rank Deficiency Tests
// ============================================================================

#[test]
fn test_single_group_is_rank_deficient() {
    for group in [0.0, 1.0] {
        let (x, eps) = common::normal_draws(25, 5);
        let c = vec![group; 25];
        let y: Vec<f64> = x.iter().zip(&eps).map(|(&x, &e)| x + 0.1 * e).collect();
        let design =
            DesignMatrices::from_observations(&common::observations(&x, &y, &c)).unwrap();

        // Restricted model is unaffected
        assert!(OlsRegressor::default()
            .fit(&design.restricted, &design.response)
            .is_ok());

        let err = OlsRegressor::default()
            .fit(&design.full, &design.response)
            .unwrap_err();
        assert!(
            matches!(err, RegressionError::RankDeficient { rank: 2, n_columns: 4 }),
            "group {group}: {err:?}"
        );
    }
}

#[test]
fn test_constant_x_is_rank_deficient() {
    let x = vec![1.5; 10];
    let y: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let c = common::alternating_groups(10);
    let design = DesignMatrices::from_observations(&common::observations(&x, &y, &c)).unwrap();

    let err = OlsRegressor::default()
        .fit(&design.restricted, &design.response)
        .unwrap_err();
    assert!(matches!(err, RegressionError::RankDeficient { .. }));
}

#[test]
fn test_rank_tolerance_is_relative() {
    // Columns on very different scales are still full rank
    let x = Mat::from_fn(8, 2, |i, j| if j == 0 { 1e6 } else { 1e-3 * i as f64 });
    assert!(OlsRegressor::is_full_rank(&x, 1e-10));

    // A looser tolerance flags the weak column
    assert!(!OlsRegressor::is_full_rank(&x, 1e-6));
}

#[test]
fn test_dimension_mismatch() {
    let x = Mat::from_fn(6, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
    let y = Col::from_fn(7, |i| i as f64);

    let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
    assert!(matches!(
        err,
        RegressionError::DimensionMismatch { x_rows: 6, y_len: 7 }
    ));
}
