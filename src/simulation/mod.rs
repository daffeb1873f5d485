//! Monte Carlo calibration: simulate data, run the test, count rejections.

mod harness;
mod response;
mod summary;

pub use harness::CalibrationHarness;
pub use response::{LinearResponse, ResponseModel};
pub use summary::{binomial_band, CalibrationSummary};
