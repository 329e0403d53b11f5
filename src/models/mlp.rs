//! Fully-connected feed-forward network (MLP).

use crate::config::MlpConfig;
use crate::error::{EngineError, Result};
use crate::layers::{DenseLayer, Layer};
use crate::models::Trainable;
use crate::utils::loss::{half_squared_error, output_gradient};
use crate::utils::{Activation, Initializer};

/// Ordered, non-empty stack of dense layers.
///
/// Adjacent layer sizes are not cross-checked at construction when assembled with
/// [`from_layers`](FeedForwardNetwork::from_layers); a mismatch surfaces as a unit
/// dimension error during `predict`.
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    layers: Vec<DenseLayer>,
}

impl FeedForwardNetwork {
    /// Build a network from `layer_sizes = [input, hidden..., output]`, every unit
    /// using `activation`.
    pub fn new(
        layer_sizes: &[usize],
        activation: Activation,
        init: &mut Initializer,
    ) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(EngineError::InvalidConstruction(
                "network needs an input size and at least one layer".to_string(),
            ));
        }
        let layers = layer_sizes
            .windows(2)
            .map(|pair| DenseLayer::new(pair[0], pair[1], activation, init))
            .collect::<Result<Vec<_>>>()?;
        Self::from_layers(layers)
    }

    pub fn from_config(config: &MlpConfig, init: &mut Initializer) -> Result<Self> {
        Self::new(&config.layer_sizes, config.activation, init)
    }

    pub fn from_layers(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(EngineError::InvalidConstruction(
                "network needs at least one layer".to_string(),
            ));
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// One training step: forward, output error `y - t`, then backward through the
    /// layers in reverse order, each layer's input gradient feeding the next.
    pub fn train_one(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        let output = self.predict(input)?;
        let mut grad = output_gradient(&output, target)?;
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad, learning_rate)?;
        }
        Ok(())
    }
}

impl Trainable for FeedForwardNetwork {
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let mut activations = input.to_vec();
        for layer in &mut self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }

    fn train(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        self.train_one(input, target, learning_rate)
    }

    fn loss(&self, output: &[f64], target: &[f64]) -> Result<f64> {
        half_squared_error(output, target)
    }
}
