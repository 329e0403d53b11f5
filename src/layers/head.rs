//! Fully connected output head for the convolutional pipeline.
//!
//! Same arithmetic as a single [`Unit`](super::Unit), except the head applies
//! `σ'(z)` itself and takes ∂L/∂y directly.

use crate::error::{EngineError, Result};
use crate::layers::Layer;
use crate::optimizers::{Optimizer, Sgd};
use crate::utils::{Activation, Initializer};

#[derive(Debug, Clone)]
struct HeadCache {
    input: Vec<f64>,
    pre_activation: f64,
    output: f64,
}

/// Maps a flattened feature vector of length `N` to a single scalar.
#[derive(Debug, Clone)]
pub struct FullyConnectedHead {
    weights: Vec<f64>,
    bias: f64,
    activation: Activation,
    cache: Option<HeadCache>,
}

impl FullyConnectedHead {
    pub fn new(input_size: usize, activation: Activation, init: &mut Initializer) -> Result<Self> {
        let weights = init.weights(input_size);
        let bias = init.bias();
        Self::from_parameters(weights, bias, activation)
    }

    pub fn from_parameters(weights: Vec<f64>, bias: f64, activation: Activation) -> Result<Self> {
        if weights.is_empty() {
            return Err(EngineError::InvalidConstruction(
                "fully connected head needs at least one input".to_string(),
            ));
        }
        Ok(Self {
            weights,
            bias,
            activation,
            cache: None,
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl Layer for FullyConnectedHead {
    type Input = [f64];
    type Output = f64;
    type InputGrad = Vec<f64>;

    fn forward(&mut self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(EngineError::DimensionMismatch {
                context: "head input",
                expected: self.weights.len(),
                actual: input.len(),
            });
        }

        let z = self
            .weights
            .iter()
            .zip(input)
            .map(|(&w, &x)| w * x)
            .sum::<f64>()
            + self.bias;
        let y = self.activation.value(z);
        self.cache = Some(HeadCache {
            input: input.to_vec(),
            pre_activation: z,
            output: y,
        });
        Ok(y)
    }

    fn backward(&mut self, grad_output: &f64, learning_rate: f64) -> Result<Vec<f64>> {
        let Some(cache) = self.cache.take() else {
            return Err(EngineError::backward_before_forward("fully connected head"));
        };

        let (z, y) = (cache.pre_activation, cache.output);
        let delta = grad_output * self.activation.derivative_from_output(z, y);
        let grad_input: Vec<f64> = self.weights.iter().map(|&w| delta * w).collect();
        let grad_weights: Vec<f64> = cache.input.iter().map(|&x| delta * x).collect();

        let sgd = Sgd::new(learning_rate);
        sgd.step(&mut self.weights, &grad_weights)?;
        sgd.step_scalar(&mut self.bias, delta);

        Ok(grad_input)
    }

    fn parameter_count(&self) -> usize {
        self.weights.len() + 1
    }

    fn is_ready(&self) -> bool {
        self.cache.is_some()
    }
}
