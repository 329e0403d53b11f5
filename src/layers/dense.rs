//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer built from independent [`Unit`]s that all read
//! the same input vector: output_j = σ(w_j · x + b_j)

use crate::error::{EngineError, Result};
use crate::layers::{Layer, Unit};
use crate::utils::{Activation, Initializer};

/// Dense (fully connected) layer: an ordered, non-empty collection of units.
///
/// # Example
///
/// ```
/// use backprop_lab::layers::{DenseLayer, Layer};
/// use backprop_lab::utils::{Activation, Initializer};
///
/// let mut init = Initializer::seeded(42);
/// let mut layer = DenseLayer::new(3, 2, Activation::Sigmoid, &mut init).unwrap();
/// let output = layer.forward(&[1.0, 0.5, -1.2]).unwrap();
/// assert_eq!(output.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    units: Vec<Unit>,
}

impl DenseLayer {
    /// Create a layer of `output_size` units, each with `input_size` weights.
    ///
    /// Units draw their weights from `init` in order, so equal initializers give
    /// identical layers.
    ///
    /// # Errors
    ///
    /// `InvalidConstruction` if either size is zero.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        init: &mut Initializer,
    ) -> Result<Self> {
        let units = (0..output_size)
            .map(|_| Unit::new(input_size, activation, init))
            .collect::<Result<Vec<_>>>()?;
        Self::from_units(units)
    }

    /// Assemble a layer from prebuilt units sharing one input size.
    pub fn from_units(units: Vec<Unit>) -> Result<Self> {
        let Some(first) = units.first() else {
            return Err(EngineError::InvalidConstruction(
                "dense layer needs at least one unit".to_string(),
            ));
        };
        let input_size = first.input_size();
        if let Some(bad) = units.iter().find(|u| u.input_size() != input_size) {
            return Err(EngineError::InvalidConstruction(format!(
                "dense layer units disagree on input size ({} vs {})",
                input_size,
                bad.input_size()
            )));
        }
        Ok(Self { input_size, units })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.units.len()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

impl Layer for DenseLayer {
    type Input = [f64];
    type Output = Vec<f64>;
    type InputGrad = Vec<f64>;

    fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.units
            .iter_mut()
            .map(|unit| unit.forward(input))
            .collect()
    }

    /// `grad_output[j]` is ∂L/∂y_j for unit j. Each unit gets
    /// `δ_j = grad_output[j] · σ'(z_j)`, and the per-input gradients of all units are
    /// summed, since every input feeds every unit.
    fn backward(&mut self, grad_output: &Vec<f64>, learning_rate: f64) -> Result<Vec<f64>> {
        if !self.is_ready() {
            return Err(EngineError::backward_before_forward("dense layer"));
        }
        if grad_output.len() != self.units.len() {
            return Err(EngineError::DimensionMismatch {
                context: "dense layer gradient",
                expected: self.units.len(),
                actual: grad_output.len(),
            });
        }

        let mut grad_input = vec![0.0; self.input_size];
        for (unit, &incoming) in self.units.iter_mut().zip(grad_output) {
            let delta = incoming * unit.activation_derivative()?;
            let unit_grad = unit.backward(delta, learning_rate)?;
            for (acc, g) in grad_input.iter_mut().zip(unit_grad) {
                *acc += g;
            }
        }
        Ok(grad_input)
    }

    fn parameter_count(&self) -> usize {
        self.units.iter().map(|u| u.input_size() + 1).sum()
    }

    fn is_ready(&self) -> bool {
        self.units.iter().all(Unit::is_ready)
    }
}
