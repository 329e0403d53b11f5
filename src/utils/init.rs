//! Parameter initializers.
//!
//! Layers pull their starting weights and biases from an [`Initializer`] in a fixed
//! order, so a given initializer state always yields the same model.

use crate::utils::rng::SimpleRng;

/// Default half-width of the uniform weight range used by [`Initializer::seeded`].
pub const DEFAULT_WEIGHT_RANGE: f64 = 0.5;

/// Source of initial scalar parameters.
#[derive(Debug, Clone)]
pub enum Initializer {
    /// Weights drawn uniformly from `[low, high)`, biases zero.
    Uniform { rng: SimpleRng, low: f64, high: f64 },
    /// Every weight and every bias takes a fixed value.
    Constant { weight: f64, bias: f64 },
}

impl Initializer {
    /// Uniform `[-0.5, 0.5)` weights and zero biases from the given seed.
    pub fn seeded(seed: u64) -> Self {
        Initializer::Uniform {
            rng: SimpleRng::new(seed),
            low: -DEFAULT_WEIGHT_RANGE,
            high: DEFAULT_WEIGHT_RANGE,
        }
    }

    pub fn constant(weight: f64, bias: f64) -> Self {
        Initializer::Constant { weight, bias }
    }

    /// Next weight value.
    pub fn weight(&mut self) -> f64 {
        match self {
            Initializer::Uniform { rng, low, high } => rng.gen_range_f64(*low, *high),
            Initializer::Constant { weight, .. } => *weight,
        }
    }

    /// `count` weights drawn in order.
    pub fn weights(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.weight()).collect()
    }

    /// Next bias value.
    pub fn bias(&mut self) -> f64 {
        match self {
            Initializer::Uniform { .. } => 0.0,
            Initializer::Constant { bias, .. } => *bias,
        }
    }
}
