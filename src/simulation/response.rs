//! Generative models for the response.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Draws a response for one observation given its predictor and group.
///
/// Any `Fn(f64, f64, &mut StdRng) -> f64` closure is a response model, so
/// ad-hoc generative formulas need no wrapper type.
pub trait ResponseModel {
    fn draw(&self, x: f64, c: f64, rng: &mut StdRng) -> f64;
}

impl<F> ResponseModel for F
where
    F: Fn(f64, f64, &mut StdRng) -> f64,
{
    fn draw(&self, x: f64, c: f64, rng: &mut StdRng) -> f64 {
        self(x, c, rng)
    }
}

/// `y = intercept + slope·x + group_shift·c + interaction·x·c + noise_std·ε`
/// with `ε ~ N(0, 1)`.
///
/// The restricted model is true exactly when `group_shift` and `interaction`
/// are both zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearResponse {
    pub intercept: f64,
    pub slope: f64,
    pub group_shift: f64,
    pub interaction: f64,
    pub noise_std: f64,
}

impl Default for LinearResponse {
    fn default() -> Self {
        Self {
            intercept: 0.0,
            slope: 1.0,
            group_shift: 0.0,
            interaction: 0.0,
            noise_std: 1.0,
        }
    }
}

impl LinearResponse {
    /// `y = x + noise_std·ε`: the group has no effect.
    pub fn null(noise_std: f64) -> Self {
        Self {
            noise_std,
            ..Default::default()
        }
    }

    pub fn intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    /// Shift of the intercept in group `c = 1`.
    pub fn group_shift(mut self, shift: f64) -> Self {
        self.group_shift = shift;
        self
    }

    /// Change of the slope in group `c = 1`.
    pub fn interaction(mut self, interaction: f64) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Noise-free mean response.
    pub fn mean(&self, x: f64, c: f64) -> f64 {
        self.intercept + self.slope * x + self.group_shift * c + self.interaction * x * c
    }

    /// Whether the data-generating process satisfies the restricted model.
    pub fn is_null(&self) -> bool {
        self.group_shift == 0.0 && self.interaction == 0.0
    }
}

impl ResponseModel for LinearResponse {
    fn draw(&self, x: f64, c: f64, rng: &mut StdRng) -> f64 {
        let eps: f64 = rng.sample(StandardNormal);
        self.mean(x, c) + self.noise_std * eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_mean() {
        let model = LinearResponse::null(0.1)
            .intercept(1.0)
            .slope(2.0)
            .group_shift(3.0)
            .interaction(-1.0);

        assert_eq!(model.mean(2.0, 0.0), 5.0);
        assert_eq!(model.mean(2.0, 1.0), 6.0);
        assert!(!model.is_null());
        assert!(LinearResponse::null(0.1).is_null());
    }

    #[test]
    fn test_noise_free_draw() {
        let model = LinearResponse::null(0.0).group_shift(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.draw(0.5, 1.0, &mut rng), 1.5);
    }

    #[test]
    fn test_closure_model() {
        let model = |x: f64, c: f64, _rng: &mut StdRng| x * (1.0 + c);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.draw(2.0, 1.0, &mut rng), 4.0);
    }

    #[test]
    fn test_draws_are_seeded() {
        let model = LinearResponse::null(0.1);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for i in 0..10 {
            let x = i as f64;
            assert_eq!(model.draw(x, 0.0, &mut a), model.draw(x, 0.0, &mut b));
        }
    }
}
