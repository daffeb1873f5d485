//! Statistical inference: the likelihood-ratio test and its one-shot driver.

mod likelihood_ratio;
mod moderation;

pub use likelihood_ratio::{
    chi_squared_sf, likelihood_ratio_test, lr_statistic, Decision, LrTestResult,
};
pub use moderation::{ModerationOutcome, ModerationTest};
