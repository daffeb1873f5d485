//! Core types for the moderation test.

mod design;
mod options;
mod result;

pub use design::{DesignMatrices, Observation, FULL_COLUMNS, RESTRICTED_COLUMNS};
pub use options::{
    validate_alpha, CalibrationOptions, CalibrationOptionsBuilder, OptionsError, MIN_OBSERVATIONS,
};
pub use result::{gaussian_log_likelihood, FitResult};
