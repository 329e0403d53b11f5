//! A single MLP neuron: weighted sum plus activation.

use crate::error::{EngineError, Result};
use crate::optimizers::{Optimizer, Sgd};
use crate::utils::{Activation, Initializer};

/// Values remembered from the last `forward` call.
#[derive(Debug, Clone)]
struct UnitCache {
    input: Vec<f64>,
    pre_activation: f64,
    output: f64,
}

/// One neuron computing `y = σ(Σ w_i x_i + b)`.
///
/// `backward` expects a delta that already includes `σ'(z)`; the owning
/// [`DenseLayer`](super::DenseLayer) multiplies it in using
/// [`activation_derivative`](Unit::activation_derivative).
#[derive(Debug, Clone)]
pub struct Unit {
    weights: Vec<f64>,
    bias: f64,
    activation: Activation,
    cache: Option<UnitCache>,
}

impl Unit {
    /// Create a unit with `input_size` weights drawn from `init`.
    pub fn new(input_size: usize, activation: Activation, init: &mut Initializer) -> Result<Self> {
        let weights = init.weights(input_size);
        let bias = init.bias();
        Self::from_parameters(weights, bias, activation)
    }

    /// Create a unit from explicit parameters.
    ///
    /// # Errors
    ///
    /// `InvalidConstruction` if `weights` is empty.
    pub fn from_parameters(weights: Vec<f64>, bias: f64, activation: Activation) -> Result<Self> {
        if weights.is_empty() {
            return Err(EngineError::InvalidConstruction(
                "unit needs at least one weight".to_string(),
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

    pub fn is_ready(&self) -> bool {
        self.cache.is_some()
    }

    /// Compute `z = w·x + b` and `y = σ(z)`, caching `x`, `z` and `y`.
    pub fn forward(&mut self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(EngineError::DimensionMismatch {
                context: "unit input",
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

        self.cache = Some(UnitCache {
            input: input.to_vec(),
            pre_activation: z,
            output: y,
        });
        Ok(y)
    }

    /// `σ'(z)` at the cached pre-activation.
    pub fn activation_derivative(&self) -> Result<f64> {
        let Some(cache) = self.cache.as_ref() else {
            return Err(EngineError::backward_before_forward("unit"));
        };
        let (z, y) = (cache.pre_activation, cache.output);
        Ok(self.activation.derivative_from_output(z, y))
    }

    /// Propagate `delta` (= ∂L/∂z) to the inputs and update the parameters.
    ///
    /// Returns `delta * w_i` for every input, using the weights from before the
    /// update. Consumes the forward cache.
    pub fn backward(&mut self, delta: f64, learning_rate: f64) -> Result<Vec<f64>> {
        let Some(cache) = self.cache.take() else {
            return Err(EngineError::backward_before_forward("unit"));
        };

        let grad_input: Vec<f64> = self.weights.iter().map(|&w| delta * w).collect();
        let grad_weights: Vec<f64> = cache.input.iter().map(|&x| delta * x).collect();

        let sgd = Sgd::new(learning_rate);
        sgd.step(&mut self.weights, &grad_weights)?;
        sgd.step_scalar(&mut self.bias, delta);

        Ok(grad_input)
    }
}
