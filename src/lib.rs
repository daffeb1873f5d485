//! Likelihood-ratio test for moderation in simple linear regression.
//!
//! Does a binary group `c` change the linear relationship between `x` and `y`?
//! The crate fits two nested models by ordinary least squares,
//!
//! * restricted: `y ~ 1 + x`
//! * full: `y ~ 1 + x + c + x:c`
//!
//! and compares them with a likelihood-ratio test whose statistic is referred
//! to a χ² distribution with 2 degrees of freedom (Wilks' theorem). A Monte
//! Carlo harness checks how often the test rejects under a known generative
//! model, i.e. its size under the null and its power under alternatives.
//!
//! # Example
//!
//! ```rust,ignore
//! use moderation_lrt::prelude::*;
//!
//! // Single dataset
//! let outcome = ModerationTest::new(0.05).run(&observations)?;
//! println!("{}", outcome.test);
//!
//! // Calibration under the null
//! let options = CalibrationOptions::builder().n_trials(1000).seed(42).build()?;
//! let summary = CalibrationHarness::new(options, LinearResponse::null(0.1))?.run();
//! println!("empirical size = {}", summary.empirical_rate);
//! ```

pub mod core;
pub mod inference;
pub mod simulation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CalibrationOptions, CalibrationOptionsBuilder, DesignMatrices, FitResult, Observation,
        OptionsError,
    };
    pub use crate::inference::{
        likelihood_ratio_test, Decision, LrTestResult, ModerationOutcome, ModerationTest,
    };
    pub use crate::simulation::{
        CalibrationHarness, CalibrationSummary, LinearResponse, ResponseModel,
    };
    pub use crate::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};
}

pub use crate::core::{DesignMatrices, FitResult, Observation};
pub use crate::inference::{likelihood_ratio_test, Decision, LrTestResult, ModerationTest};
pub use crate::simulation::{CalibrationHarness, CalibrationSummary, LinearResponse};
pub use crate::solvers::{OlsRegressor, RegressionError};
